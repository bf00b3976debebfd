use std::io;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use medium_types::Post;
use medium_types::api::CreatePostRequest;
use reqwest::StatusCode;
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::nav::NavShell;
use crate::route::Route;

/// The "new post" screen. Images are held in memory as `data:` URLs until
/// publish; the only size cap is the server's body limit.
#[derive(Debug, Default, Clone)]
pub struct ComposerView {
    pub title: String,
    pub content: String,
    images: Vec<String>,
    pub error: Option<String>,
}

impl ComposerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn add_image(&mut self, bytes: &[u8], mime: &str) {
        self.images.push(data_url(mime, bytes));
    }

    /// Read an image from disk, guessing its type from the extension.
    pub fn add_image_file(&mut self, path: &Path) -> io::Result<()> {
        let bytes = std::fs::read(path)?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        self.add_image(&bytes, mime.essence_str());
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// "Draft in <username>", or an ellipsis while logged out.
    pub fn draft_label(&self, shell: &NavShell) -> String {
        format!("Draft in {}", shell.username().unwrap_or("..."))
    }

    pub fn draft(&self, shell: &NavShell) -> CreatePostRequest {
        CreatePostRequest {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            images: Some(self.images.clone()),
            author: shell.username().map(str::to_string),
            created_at: Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        }
    }

    /// Send the draft. On success the composer is cleared and the shell moves to the feed.
    /// A 401 logs the shell out, keeping the draft so it can be sent after logging in.
    pub async fn publish(&mut self, api: &ApiClient, shell: &mut NavShell) -> Option<Post> {
        self.error = None;

        let Some(token) = shell.session().map(|s| s.token.clone()) else {
            self.error = Some("Log in to publish".to_string());
            return None;
        };

        match api.create_post(&token, &self.draft(shell)).await {
            Ok(post) => {
                info!("Published post {}", post.id);
                *self = Self::default();
                shell.navigate(Route::Home);
                Some(post)
            }
            Err(e) if e.status() == Some(StatusCode::UNAUTHORIZED) => {
                // The server no longer accepts the stored token.
                warn!("Publish rejected the session: {}", e);
                shell.logout();
                self.error = Some("Your session has expired. Log in again to publish".to_string());
                None
            }
            Err(e) => {
                error!("Publish failed: {}", e);
                self.error = Some(format!("Publish failed: {}", e));
                None
            }
        }
    }
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, B64.encode(bytes))
}
