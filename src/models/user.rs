use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

/// A row of the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub hashed_password: String,
    pub role: String,
    pub is_active: bool,
}

/// What the API shows of a user. Never includes the password hash.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_active: user.is_active,
        }
    }
}

/// Column values for a new user; the password is already hashed.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub hashed_password: &'a str,
    pub role: &'a str,
}

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, hashed_password, role, is_active";

impl User {
    /// Inserts an active user. Duplicate usernames or emails are rejected by
    /// the table's unique constraints.
    pub async fn insert(conn: &mut SqliteConnection, new: NewUser<'_>) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, first_name, last_name, hashed_password, role, is_active)
             VALUES (?, ?, ?, ?, ?, ?, 1)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(new.username)
        .bind(new.email)
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.hashed_password)
        .bind(new.role)
        .fetch_one(conn)
        .await
    }

    pub async fn find_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(conn)
        .await
    }
}
