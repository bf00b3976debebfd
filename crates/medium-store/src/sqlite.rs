use std::path::Path;
use std::sync::Mutex;

use anyhow::anyhow;
use medium_types::Post;
use rusqlite::Connection;
use tracing::info;

use crate::migrations;
use crate::models::{NewPost, NewUser, StoredUser};
use crate::{Result, Store, StoreError, next_post_id, now_millis};

/// SQLite-backed store. A single connection guarded by a mutex; every
/// operation is a short statement so contention stays low.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Backend(anyhow!("DB lock poisoned: {}", e)))?;
        f(&conn)
    }
}

impl Store for SqliteStore {
    fn create_user(&self, user: NewUser) -> Result<()> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO users (email, username, password_hash) VALUES (?1, ?2, ?3)",
                (&user.email, &user.username, &user.password_hash),
            )?;
            if inserted == 0 {
                return Err(StoreError::EmailTaken);
            }
            Ok(())
        })
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT username, email, password_hash FROM users WHERE email = ?1",
                    [email],
                    |row| {
                        Ok(StoredUser {
                            username: row.get(0)?,
                            email: row.get(1)?,
                            password_hash: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }

    fn create_post(&self, post: NewPost) -> Result<Post> {
        let images = serde_json::to_string(&post.images).map_err(anyhow::Error::from)?;
        self.with_conn(|conn| {
            let last: Option<i64> = conn.query_row("SELECT MAX(id) FROM posts", [], |row| row.get(0))?;
            let id = next_post_id(last, now_millis());
            conn.execute(
                "INSERT INTO posts (id, title, content, images, author, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![id, &post.title, &post.content, &images, &post.author, &post.created_at],
            )?;
            Ok(Post {
                id,
                title: post.title,
                content: post.content,
                images: post.images,
                author: post.author,
                created_at: post.created_at,
            })
        })
    }

    fn list_posts(&self) -> Result<Vec<Post>> {
        self.with_conn(|conn| {
            // Ids only grow, so id order is insertion order.
            let mut stmt = conn.prepare(
                "SELECT id, title, content, images, author, created_at FROM posts ORDER BY id ASC",
            )?;
            let rows = stmt
                .query_map([], read_post_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows.into_iter().map(into_post).collect()
        })
    }

    fn get_post(&self, id: i64) -> Result<Option<Post>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, title, content, images, author, created_at FROM posts WHERE id = ?1",
                    [id],
                    read_post_row,
                )
                .optional()?;
            row.map(into_post).transpose()
        })
    }
}

/// Raw post row; `images` is still the JSON text column.
struct PostRow {
    id: i64,
    title: String,
    content: String,
    images: String,
    author: String,
    created_at: String,
}

fn read_post_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        images: row.get(3)?,
        author: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn into_post(row: PostRow) -> Result<Post> {
    let images: Vec<String> = serde_json::from_str(&row.images)
        .map_err(|e| anyhow!("Corrupt images column on post {}: {}", row.id, e))?;
    Ok(Post {
        id: row.id,
        title: row.title,
        content: row.content,
        images,
        author: row.author,
        created_at: row.created_at,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[test]
    fn duplicate_email_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create_user(user("a@x.com", "a")).unwrap();

        let err = store.create_user(user("a@x.com", "b")).unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken));
        assert_eq!(store.find_user_by_email("a@x.com").unwrap().unwrap().username, "a");
    }

    #[test]
    fn post_round_trips_images_and_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = store
            .create_post(NewPost {
                title: "T".into(),
                content: "C".into(),
                images: vec!["data:image/png;base64,AAAA".into()],
                author: "a".into(),
                created_at: "2025-07-17T08:00:00.000Z".into(),
            })
            .unwrap();
        let second = store
            .create_post(NewPost {
                title: "T2".into(),
                content: "C2".into(),
                images: vec![],
                author: "a".into(),
                created_at: "2025-07-17T08:00:01.000Z".into(),
            })
            .unwrap();

        assert!(second.id > first.id);
        assert_eq!(store.get_post(first.id).unwrap(), Some(first.clone()));
        assert_eq!(store.list_posts().unwrap(), vec![first, second]);
        assert_eq!(store.get_post(999_999).unwrap(), None);
    }

    #[test]
    fn data_survives_reopen() {
        let path = std::env::temp_dir().join(format!("medium_store_test_{}.db", now_millis()));
        {
            let store = SqliteStore::open(&path).unwrap();
            store.create_user(user("p@x.com", "p")).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert!(store.find_user_by_email("p@x.com").unwrap().is_some());
        let _ = std::fs::remove_file(&path);
    }
}
