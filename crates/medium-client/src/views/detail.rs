use medium_types::Post;
use reqwest::StatusCode;
use tracing::warn;

use crate::api::ApiClient;
use crate::examples::example_post;
use crate::views::display_date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostDetailView {
    /// Served by the backend.
    Found(Post),
    /// The backend did not serve it, so the bundled example with the same id is
    /// shown. `backend_error` is set unless the backend answered 404.
    Example {
        post: Post,
        backend_error: Option<String>,
    },
    /// The backend answered 404 and no example has this id.
    NotFound,
    /// The backend failed or could not be reached; the post may still exist.
    Unavailable { error: String },
}

impl PostDetailView {
    pub async fn load(api: &ApiClient, id: i64) -> Self {
        let err = match api.get_post(id).await {
            Ok(post) => return PostDetailView::Found(post),
            Err(e) => e,
        };

        let backend_error = if err.status() == Some(StatusCode::NOT_FOUND) {
            None
        } else {
            warn!("Failed to load post {}: {}", id, err);
            Some(err.to_string())
        };

        match (example_post(id), backend_error) {
            (Some(example), backend_error) => PostDetailView::Example {
                post: example.to_post(),
                backend_error,
            },
            (None, None) => PostDetailView::NotFound,
            (None, Some(error)) => PostDetailView::Unavailable { error },
        }
    }

    pub fn post(&self) -> Option<&Post> {
        match self {
            PostDetailView::Found(post) | PostDetailView::Example { post, .. } => Some(post),
            PostDetailView::NotFound | PostDetailView::Unavailable { .. } => None,
        }
    }

    /// `July 17, 2025 · Jane Doe`
    pub fn byline(&self) -> Option<String> {
        self.post()
            .map(|p| format!("{} · {}", display_date(&p.created_at), p.author))
    }

    /// Only the first image is shown as a cover.
    pub fn cover_image(&self) -> Option<&str> {
        self.post().and_then(|p| p.images.first()).map(String::as_str)
    }

    pub fn banner(&self) -> Option<String> {
        match self {
            PostDetailView::Example {
                backend_error: Some(error),
                ..
            } => Some(format!("Showing a bundled copy; the server could not provide this post: {}", error)),
            PostDetailView::NotFound => Some("Post not found".to_string()),
            PostDetailView::Unavailable { error } => {
                Some(format!("Could not load this post from the server: {}", error))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::examples::EXAMPLE_POSTS;

    #[test]
    fn byline_and_cover_for_example() {
        let view = PostDetailView::Example {
            post: EXAMPLE_POSTS[0].to_post(),
            backend_error: None,
        };
        assert_eq!(view.byline().as_deref(), Some("July 17, 2025 · Jane Doe"));
        assert_eq!(view.cover_image(), Some(EXAMPLE_POSTS[0].image));
        assert_eq!(view.banner(), None);
    }

    #[test]
    fn not_found_has_no_post() {
        let view = PostDetailView::NotFound;
        assert!(view.post().is_none());
        assert!(view.byline().is_none());
        assert_eq!(view.banner().as_deref(), Some("Post not found"));
    }

    #[test]
    fn outage_is_not_reported_as_missing() {
        let view = PostDetailView::Unavailable {
            error: "could not reach server".into(),
        };
        assert!(view.post().is_none());
        let banner = view.banner().unwrap();
        assert!(banner.contains("could not reach server"));
        assert_ne!(banner, "Post not found");
    }
}
