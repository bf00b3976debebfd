mod support;

use serde_json::json;

use support::spawn_app_with_limit;

#[tokio::test]
async fn test_oversized_body_rejected() {
    let server = spawn_app_with_limit(1024).await;

    let resp = server
        .client
        .post(server.url("/api/register"))
        .json(&json!({ "username": "x".repeat(4096), "email": "a@x.com", "password": "p" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 413);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = spawn_app_with_limit(1024).await;

    let resp = server
        .client
        .get(server.url("/api/posts"))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
