use crate::api::{ApiClient, ClientError};
use crate::nav::NavShell;
use crate::route::Route;

#[derive(Debug, Default, Clone)]
pub struct RegisterView {
    pub username: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl RegisterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registration does not log in; on success the shell moves to the login page.
    pub async fn submit(&mut self, api: &ApiClient, shell: &mut NavShell) -> bool {
        self.error = None;

        match api.register(&self.username, &self.email, &self.password).await {
            Ok(_) => {
                self.password.clear();
                shell.notify("Registration successful!");
                shell.navigate(Route::Login);
                true
            }
            Err(e) => {
                // Status errors carry the server's own message (e.g. email taken).
                self.error = Some(match e {
                    ClientError::Status { message, .. } => message,
                    other => other.to_string(),
                });
                false
            }
        }
    }
}
