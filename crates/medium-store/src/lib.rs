//! Storage for users and posts.
//!
//! Handlers only see the [`Store`] trait. Two backends ship with the crate: a
//! process-local [`MemoryStore`] whose contents vanish on restart, and a
//! [`SqliteStore`] that persists to a file.

pub mod memory;
pub mod migrations;
pub mod models;
pub mod sqlite;

use medium_types::Post;
use thiserror::Error;

pub use memory::MemoryStore;
pub use models::{NewPost, NewUser, StoredUser};
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email is already registered")]
    EmailTaken,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.into())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

pub trait Store: Send + Sync {
    /// Fails with [`StoreError::EmailTaken`] when the email already exists.
    fn create_user(&self, user: NewUser) -> Result<()>;

    fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>>;

    /// Assigns an id and returns the post exactly as stored.
    fn create_post(&self, post: NewPost) -> Result<Post>;

    /// All posts in insertion order.
    fn list_posts(&self) -> Result<Vec<Post>>;

    fn get_post(&self, id: i64) -> Result<Option<Post>>;
}

/// Post ids are millisecond timestamps, bumped past the last issued id so
/// that two posts created within the same millisecond never share one.
pub(crate) fn next_post_id(last: Option<i64>, now_ms: i64) -> i64 {
    match last {
        Some(last) if last >= now_ms => last + 1,
        _ => now_ms,
    }
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_id_is_the_timestamp() {
        assert_eq!(next_post_id(None, 1_700_000_000_000), 1_700_000_000_000);
    }

    #[test]
    fn same_millisecond_bumps_past_last_id() {
        assert_eq!(next_post_id(Some(500), 500), 501);
        assert_eq!(next_post_id(Some(502), 500), 503);
        assert_eq!(next_post_id(Some(400), 500), 500);
    }
}
