//! Client side of the blog: a typed HTTP client plus the state behind each
//! screen (feed, post detail, login, registration, composer) and the
//! navigation shell that tracks who is logged in.
//!
//! Views hold plain data and are driven by async `load`/`submit` calls, so any
//! front end (web, desktop, terminal) can render them.

pub mod api;
pub mod examples;
pub mod nav;
pub mod route;
pub mod session;
pub mod storage;
pub mod views;

pub use api::{ApiClient, ClientError};
pub use nav::NavShell;
pub use route::Route;
pub use session::Session;
pub use storage::{FileStorage, MemoryStorage, TOKEN_KEY, TokenStorage};
