use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// Claims carried by the token issued at login. Shared by the API (which signs
/// and verifies) and the client (which only decodes the payload for display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

// -- Auth --

/// Every field is optional on the wire so a missing field can be reported as a
/// 400 with a message instead of a decode rejection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// Body of every non-post reply: confirmations and errors alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// -- Posts --

/// `author` is accepted for compatibility with older clients but the server
/// always overwrites it with the authenticated username.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
    pub author: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
