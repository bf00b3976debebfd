use crate::api::ApiClient;
use crate::nav::NavShell;
use crate::route::Route;

#[derive(Debug, Default, Clone)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    /// On success the shell holds the new session and has moved to the feed.
    pub async fn submit(&mut self, api: &ApiClient, shell: &mut NavShell) -> bool {
        self.error = None;

        let resp = match api.login(&self.email, &self.password).await {
            Ok(resp) => resp,
            Err(e) if e.is_unreachable() => {
                self.error = Some(e.to_string());
                return false;
            }
            Err(_) => {
                self.error = Some("Login failed".to_string());
                return false;
            }
        };

        if let Err(e) = shell.login_success(resp.token) {
            self.error = Some(format!("Login failed: {}", e));
            return false;
        }

        self.password.clear();
        shell.notify("Login successful!");
        shell.navigate(Route::Home);
        true
    }
}
