use serde::{Deserialize, Serialize};

/// A published article as stored by the API and returned to clients.
///
/// `id` is a millisecond timestamp taken at creation time. `author` is a
/// display string, not a reference to a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    /// HTML body.
    pub content: String,
    /// Inline `data:` URLs.
    #[serde(default)]
    pub images: Vec<String>,
    pub author: String,
    pub created_at: String,
}
