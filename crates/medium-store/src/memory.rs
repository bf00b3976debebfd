use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use medium_types::Post;

use crate::models::{NewPost, NewUser, StoredUser};
use crate::{Result, Store, StoreError, next_post_id, now_millis};

/// Users and posts held in process memory. Everything is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<StoredUser>,
    posts: Vec<Post>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Backend(anyhow!("Store lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Backend(anyhow!("Store lock poisoned: {}", e)))
    }
}

impl Store for MemoryStore {
    fn create_user(&self, user: NewUser) -> Result<()> {
        let mut inner = self.write()?;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::EmailTaken);
        }
        inner.users.push(user.into());
        Ok(())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
        let inner = self.read()?;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    fn create_post(&self, post: NewPost) -> Result<Post> {
        let mut inner = self.write()?;
        let last = inner.posts.iter().map(|p| p.id).max();
        let post = Post {
            id: next_post_id(last, now_millis()),
            title: post.title,
            content: post.content,
            images: post.images,
            author: post.author,
            created_at: post.created_at,
        };
        inner.posts.push(post.clone());
        Ok(post)
    }

    fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.read()?.posts.clone())
    }

    fn get_post(&self, id: i64) -> Result<Option<Post>> {
        Ok(self.read()?.posts.iter().find(|p| p.id == id).cloned())
    }
}
