use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Placeholder JWT secrets that should never reach production.
pub const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub body_limit: usize,
    /// `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset and empty values take the default.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match get("MEDIUM_PORT") {
            Some(v) => v.parse().with_context(|| format!("MEDIUM_PORT is not a port: {}", v))?,
            None => 3000,
        };
        let token_ttl_secs = match get("MEDIUM_TOKEN_TTL_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("MEDIUM_TOKEN_TTL_SECS is not a number: {}", v))?,
            None => 3600,
        };
        let body_limit = match get("MEDIUM_BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse()
                .with_context(|| format!("MEDIUM_BODY_LIMIT_BYTES is not a number: {}", v))?,
            None => medium_api::DEFAULT_BODY_LIMIT,
        };

        Ok(Self {
            host: get("MEDIUM_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            jwt_secret: get("MEDIUM_JWT_SECRET").unwrap_or_else(|| "dev-secret-change-me".into()),
            token_ttl_secs,
            body_limit,
            db_path: get("MEDIUM_DB_PATH").map(PathBuf::from),
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    pub fn uses_placeholder_secret(&self) -> bool {
        PLACEHOLDER_SECRETS.contains(&self.jwt_secret.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.token_ttl_secs, 3600);
        assert_eq!(cfg.body_limit, 10 * 1024 * 1024);
        assert!(cfg.db_path.is_none());
        assert!(cfg.uses_placeholder_secret());
        assert_eq!(cfg.addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("MEDIUM_HOST", "127.0.0.1"),
            ("MEDIUM_PORT", "8080"),
            ("MEDIUM_JWT_SECRET", "a-real-secret"),
            ("MEDIUM_TOKEN_TTL_SECS", "60"),
            ("MEDIUM_DB_PATH", "blog.db"),
        ])
        .unwrap();
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.token_ttl_secs, 60);
        assert_eq!(cfg.db_path, Some(PathBuf::from("blog.db")));
        assert!(!cfg.uses_placeholder_secret());
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("MEDIUM_PORT", "http")]).is_err());
    }
}
