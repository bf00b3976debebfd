//! One module per screen. Each view owns its form or load state and reports
//! failures as data the renderer can show, never by panicking.

pub mod composer;
pub mod detail;
pub mod home;
pub mod login;
pub mod register;

pub use composer::ComposerView;
pub use detail::PostDetailView;
pub use home::{FeedState, HomeView, PostCard};
pub use login::LoginView;
pub use register::RegisterView;

/// `2025-07-17T08:00:00.000Z` or `2025-07-17` -> `July 17, 2025`.
/// Anything else is shown as-is.
pub fn display_date(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%B %-d, %Y").to_string();
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }
    if raw.is_empty() {
        return "Unknown date".to_string();
    }
    raw.to_string()
}
