use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use medium_types::Post;
use medium_types::api::{
    CreatePostRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message} ({status})")]
    Status { status: StatusCode, message: String },
    /// The request never got an answer: connection refused, DNS, timeout.
    #[error("could not reach server: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend could not be contacted at all, as opposed to
    /// answering with an error.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

/// Thin typed wrapper over the REST endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Returns the server's confirmation message. No token is issued here.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<String, ClientError> {
        let body = RegisterRequest {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        let resp = self
            .http
            .post(self.url("/api/register"))
            .json(&body)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let msg: MessageResponse = decode(resp).await?;
        Ok(msg.message)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        let resp = self
            .http
            .post(self.url("/api/login"))
            .json(&body)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(resp).await
    }

    pub async fn create_post(&self, token: &str, draft: &CreatePostRequest) -> Result<Post, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/posts"))
            .bearer_auth(token)
            .json(draft)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(resp).await
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/posts"))
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(resp).await
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/api/posts/{}", id)))
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return resp.json().await.map_err(ClientError::Decode);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&text)
        .map(|m| m.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    debug!("{} -> {}", status, message);
    Err(ClientError::Status { status, message })
}
