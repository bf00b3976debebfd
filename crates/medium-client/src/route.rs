use std::fmt;

/// Client-side screens, addressed by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    NewPost,
    PostDetail(i64),
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        match trimmed {
            "/" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/new" => Route::NewPost,
            other => other
                .strip_prefix("/post/")
                .and_then(|id| id.parse().ok())
                .map(Route::PostDetail)
                .unwrap_or_else(|| Route::NotFound(path.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Login => "/login".into(),
            Route::Register => "/register".into(),
            Route::NewPost => "/new".into(),
            Route::PostDetail(id) => format!("/post/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
