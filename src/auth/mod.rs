pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use validator::Validate;

use crate::error::AppError;
use crate::models::{NewUser, User};

pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenKeys};

/// Payload of `POST /auth/auth`.
///
/// Fields are stored as given; only empty username, email or password are
/// rejected. Uniqueness is left to the store.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// Never used for authorization.
    pub role: String,
}

/// OAuth2 password-grant form posted to `POST /auth/token`.
///
/// Only `username` and `password` are used; the remaining fields are accepted
/// so standard OAuth2 clients can post their usual form.
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Body returned by a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Creates an active user with a bcrypt hash of the password.
///
/// Duplicates are caught by the store's unique constraints and surface as
/// `AppError::Conflict`.
pub async fn register_user(
    conn: &mut SqliteConnection,
    request: &RegisterRequest,
    bcrypt_cost: u32,
) -> Result<User, AppError> {
    let hashed_password = hash_password(&request.password, bcrypt_cost)?;
    let user = User::insert(
        conn,
        NewUser {
            username: &request.username,
            email: &request.email,
            first_name: &request.first_name,
            last_name: &request.last_name,
            hashed_password: &hashed_password,
            role: &request.role,
        },
    )
    .await?;

    log::info!("Registered user {} (id {})", user.username, user.id);
    Ok(user)
}

/// Returns the user when `password` matches, `None` when the user is unknown
/// or the password is wrong.
pub async fn authenticate_user(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let Some(user) = User::find_by_username(conn, username).await? else {
        return Ok(None);
    };
    if !verify_password(password, &user.hashed_password)? {
        return Ok(None);
    }
    Ok(Some(user))
}
