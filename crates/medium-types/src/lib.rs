pub mod api;
pub mod models;

pub use api::Claims;
pub use models::Post;
