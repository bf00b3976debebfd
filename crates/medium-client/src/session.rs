use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use thiserror::Error;
use tracing::{debug, warn};

use medium_types::Claims;

use crate::storage::{TOKEN_KEY, TokenStorage};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token payload does not hold claims: {0}")]
    Claims(#[from] serde_json::Error),
    #[error("token expired at {0}")]
    Expired(i64),
    #[error("could not persist token: {0}")]
    Storage(#[from] std::io::Error),
}

/// Read the claims out of a JWT without checking its signature.
///
/// The client never holds the signing secret; the payload is only used to show
/// who is logged in. The server verifies the token on every protected call.
pub fn decode_unverified(token: &str) -> Result<Claims, SessionError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(SessionError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// A token together with the claims decoded from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub claims: Claims,
}

impl Session {
    /// Decode `token`, rejecting it if it has expired as of `now` (Unix seconds).
    pub fn from_token(token: String, now: i64) -> Result<Self, SessionError> {
        let claims = decode_unverified(&token)?;
        if claims.exp <= now {
            return Err(SessionError::Expired(claims.exp));
        }
        Ok(Self { token, claims })
    }

    pub fn username(&self) -> &str {
        &self.claims.username
    }

    /// Load the stored token. One that cannot be decoded or has expired is
    /// deleted from storage and the result is a logged-out state.
    pub fn restore(storage: &dyn TokenStorage, now: i64) -> Option<Self> {
        let token = storage.get(TOKEN_KEY)?;
        match Self::from_token(token, now) {
            Ok(session) => Some(session),
            Err(e) => {
                debug!("Discarding stored token: {}", e);
                if let Err(e) = storage.remove(TOKEN_KEY) {
                    warn!("Failed to clear stored token: {}", e);
                }
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn fake_token(username: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = Claims {
        email: format!("{}@x.com", username),
        username: username.to_string(),
        iat: exp - 3600,
        exp,
    };
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const NOW: i64 = 1_750_000_000;

    #[test]
    fn decodes_payload_without_secret() {
        let claims = decode_unverified(&fake_token("a", NOW + 10)).unwrap();
        assert_eq!(claims.username, "a");
        assert_eq!(claims.email, "a@x.com");
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(matches!(decode_unverified("abc"), Err(SessionError::Malformed)));
        assert!(matches!(decode_unverified("a.b.c.d"), Err(SessionError::Malformed)));
        assert!(matches!(decode_unverified("a.!!!.c"), Err(SessionError::Encoding(_))));

        let not_claims = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"[1,2,3]"));
        assert!(matches!(decode_unverified(&not_claims), Err(SessionError::Claims(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let err = Session::from_token(fake_token("a", NOW), NOW).unwrap_err();
        assert!(matches!(err, SessionError::Expired(exp) if exp == NOW));
    }

    #[test]
    fn restore_keeps_valid_token() {
        let storage = MemoryStorage::new();
        let token = fake_token("a", NOW + 60);
        storage.set(TOKEN_KEY, &token).unwrap();

        let session = Session::restore(&storage, NOW).unwrap();
        assert_eq!(session.username(), "a");
        assert_eq!(storage.get(TOKEN_KEY), Some(token));
    }

    #[test]
    fn restore_clears_bad_tokens() {
        let storage = MemoryStorage::new();

        storage.set(TOKEN_KEY, "garbage").unwrap();
        assert!(Session::restore(&storage, NOW).is_none());
        assert_eq!(storage.get(TOKEN_KEY), None);

        storage.set(TOKEN_KEY, &fake_token("a", NOW - 1)).unwrap();
        assert!(Session::restore(&storage, NOW).is_none());
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn restore_without_token_is_logged_out() {
        assert!(Session::restore(&MemoryStorage::new(), NOW).is_none());
    }
}
