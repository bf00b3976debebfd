//! Input and row types for the store. Distinct from the medium-types wire
//! models so the storage layer can carry fields that must never be serialized.

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl From<NewUser> for StoredUser {
    fn from(user: NewUser) -> Self {
        StoredUser {
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
        }
    }
}

/// A post before the store has assigned its id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub author: String,
    pub created_at: String,
}
