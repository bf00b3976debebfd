use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::{SaltString, rand_core::OsRng}};
use axum::{Json, extract::State, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::{info, warn};

use medium_store::{NewUser, Store};
use medium_types::Claims;
use medium_types::api::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};

use crate::error::ApiError;
use crate::extract::{JsonOrForm, required};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Arc<dyn Store>,
    pub jwt_secret: String,
    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_secs: i64,
}

pub async fn register(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(username), Some(email), Some(password)) = (
        required(req.username),
        required(req.email),
        required(req.password),
    ) else {
        return Err(ApiError::BadRequest(
            "username, email and password are required".into(),
        ));
    };

    // Checked before hashing so a duplicate costs nothing; the store
    // enforces uniqueness again on insert.
    if state.store.find_user_by_email(&email)?.is_some() {
        return Err(ApiError::Conflict("email is already registered".into()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?
        .to_string();

    state.store.create_user(NewUser {
        username: username.clone(),
        email: email.clone(),
        password_hash,
    })?;

    info!("Registered {} <{}>", username, email);

    Ok(Json(MessageResponse {
        message: "registration successful".into(),
    }))
}

pub async fn login(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invalid = || ApiError::Unauthorized("invalid email or password".into());

    let (Some(email), Some(password)) = (required(req.email), required(req.password)) else {
        return Err(invalid());
    };

    let Some(user) = state.store.find_user_by_email(&email)? else {
        warn!("Login attempt for unknown email");
        return Err(invalid());
    };

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| anyhow::anyhow!("Stored hash for {} is unreadable: {}", user.email, e))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        warn!("Wrong password for {}", user.email);
        return Err(invalid());
    }

    let token = create_token(
        &state.jwt_secret,
        &user.email,
        &user.username,
        state.token_ttl_secs,
    )?;

    info!("{} logged in", user.username);

    Ok(Json(LoginResponse {
        token,
        username: user.username,
    }))
}

/// Sign an HS256 token for `email`/`username` that expires `ttl_secs` from now.
pub fn create_token(secret: &str, email: &str, username: &str, ttl_secs: i64) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        email: email.to_string(),
        username: username.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::verify_token;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let token = create_token("s3cret", "a@x.com", "a", 3600).unwrap();
        let claims = verify_token("s3cret", &token).unwrap();

        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.username, "a");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_rejected_with_other_secret() {
        let token = create_token("s3cret", "a@x.com", "a", 3600).unwrap();
        assert!(verify_token("other", &token).is_err());
    }

    #[test]
    fn expired_token_rejected() {
        // Past the default 60 s validation leeway.
        let token = create_token("s3cret", "a@x.com", "a", -3600).unwrap();
        assert!(verify_token("s3cret", &token).is_err());
    }
}
