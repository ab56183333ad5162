use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username of the token holder.
    pub sub: String,
    /// Database id of the token holder.
    pub id: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Signing material and default lifetime for access tokens.
///
/// Built once from configuration and shared with handlers and the auth
/// middleware through `web::Data`.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Lifetime applied by [`TokenKeys::issue_default`].
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Signs an HS256 token for `username`/`user_id` that expires `ttl` from now.
    pub fn issue(&self, username: &str, user_id: i64, ttl: Duration) -> Result<String, AppError> {
        let claims = Claims {
            sub: username.to_string(),
            id: user_id,
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    pub fn issue_default(&self, username: &str, user_id: i64) -> Result<String, AppError> {
        self.issue(username, user_id, self.ttl)
    }

    /// Checks signature and expiry and returns the embedded claims.
    ///
    /// Any failure, including a token without `sub` or `id`, is `Unauthorized`.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding, &validation)?.claims;
        if claims.sub.is_empty() {
            return Err(AppError::Unauthorized("Could not validate user".into()));
        }
        Ok(claims)
    }
}
