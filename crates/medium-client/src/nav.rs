use std::sync::Arc;

use tracing::{info, warn};

use crate::route::Route;
use crate::session::{Session, SessionError};
use crate::storage::{TOKEN_KEY, TokenStorage};

/// Entries in the top navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    Write,
    Logout,
    Login,
    Register,
}

impl NavLink {
    pub fn label(self) -> &'static str {
        match self {
            NavLink::Write => "Write",
            NavLink::Logout => "Logout",
            NavLink::Login => "Login",
            NavLink::Register => "Register",
        }
    }

    /// `None` for Logout, which is an action rather than a page.
    pub fn route(self) -> Option<Route> {
        match self {
            NavLink::Write => Some(Route::NewPost),
            NavLink::Logout => None,
            NavLink::Login => Some(Route::Login),
            NavLink::Register => Some(Route::Register),
        }
    }
}

/// Application shell: current route, login state, and one pending notice.
pub struct NavShell {
    storage: Arc<dyn TokenStorage>,
    session: Option<Session>,
    route: Route,
    notice: Option<String>,
}

impl NavShell {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self::restore_at(storage, chrono::Utc::now().timestamp())
    }

    /// Restore login state from `storage` as of `now` (Unix seconds).
    pub fn restore_at(storage: Arc<dyn TokenStorage>, now: i64) -> Self {
        let session = Session::restore(storage.as_ref(), now);
        Self {
            storage,
            session,
            route: Route::Home,
            notice: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(Session::username)
    }

    pub fn greeting(&self) -> Option<String> {
        self.username().map(|name| format!("Hi, {}", name))
    }

    pub fn links(&self) -> Vec<NavLink> {
        if self.is_logged_in() {
            vec![NavLink::Write, NavLink::Logout]
        } else {
            vec![NavLink::Login, NavLink::Register]
        }
    }

    /// Adopt a freshly issued token and persist it for the next start.
    pub fn login_success(&mut self, token: String) -> Result<(), SessionError> {
        let session = Session::from_token(token, chrono::Utc::now().timestamp())?;
        self.storage.set(TOKEN_KEY, &session.token)?;
        info!("Logged in as {}", session.username());
        self.session = Some(session);
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            warn!("Failed to clear stored token: {}", e);
        }
        self.session = None;
        self.route = Route::Login;
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn navigate(&mut self, route: Route) {
        self.route = route;
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fake_token;
    use crate::storage::MemoryStorage;

    fn far_future() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn logged_out_by_default() {
        let shell = NavShell::new(Arc::new(MemoryStorage::new()));
        assert!(!shell.is_logged_in());
        assert_eq!(shell.greeting(), None);
        assert_eq!(shell.links(), vec![NavLink::Login, NavLink::Register]);
        assert_eq!(shell.route(), &Route::Home);
    }

    #[test]
    fn login_persists_and_logout_clears() {
        let storage = Arc::new(MemoryStorage::new());
        let mut shell = NavShell::new(storage.clone());

        let token = fake_token("writer", far_future());
        shell.login_success(token.clone()).unwrap();
        assert_eq!(shell.greeting().as_deref(), Some("Hi, writer"));
        assert_eq!(shell.links(), vec![NavLink::Write, NavLink::Logout]);
        assert_eq!(storage.get(TOKEN_KEY), Some(token));

        // A new shell over the same storage picks the session back up.
        let reopened = NavShell::new(storage.clone());
        assert_eq!(reopened.username(), Some("writer"));

        shell.logout();
        assert!(!shell.is_logged_in());
        assert_eq!(shell.route(), &Route::Login);
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn undecodable_login_token_leaves_state_untouched() {
        let storage = Arc::new(MemoryStorage::new());
        let mut shell = NavShell::new(storage.clone());

        assert!(shell.login_success("nonsense".into()).is_err());
        assert!(!shell.is_logged_in());
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn notice_is_taken_once() {
        let mut shell = NavShell::new(Arc::new(MemoryStorage::new()));
        shell.notify("Login successful!");
        assert_eq!(shell.take_notice().as_deref(), Some("Login successful!"));
        assert_eq!(shell.take_notice(), None);
    }

    #[test]
    fn link_targets() {
        assert_eq!(NavLink::Write.route(), Some(Route::NewPost));
        assert_eq!(NavLink::Logout.route(), None);
        assert_eq!(NavLink::Register.label(), "Register");
    }
}
