//!
//! # Error Handling
//!
//! `AppError` is the single error type returned by handlers, extractors and the
//! store functions in `models`. It implements `actix_web::error::ResponseError`
//! so a handler returning `Result<_, AppError>` is rendered as a JSON body of
//! the form `{"error": "..."}` with the matching status code.
//!
//! `From` conversions exist for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError`, so `?` works across
//! the crate.

use actix_web::{error::ResponseError, http::header, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Every failure a request can end in.
#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed, expired or wrongly signed token, or bad credentials (HTTP 401).
    Unauthorized(String),
    /// A body, form or path that could not be deserialized (HTTP 400).
    BadRequest(String),
    /// The requested row does not exist (HTTP 404).
    NotFound(String),
    /// A unique constraint in the store was violated (HTTP 409).
    Conflict(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Any store error other than a unique violation (HTTP 500).
    DatabaseError(String),
    /// Field constraints violated after successful deserialization (HTTP 422).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        let msg = match self {
            AppError::Unauthorized(msg) => {
                builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
                msg.as_str()
            }
            // Store details stay in the log, not in the response.
            AppError::DatabaseError(_) => "Database error",
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InternalServerError(msg)
            | AppError::ValidationError(msg) => msg.as_str(),
        };
        builder.json(json!({ "error": msg }))
    }
}

/// Unique violations become `Conflict`; everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                log::warn!("Unique constraint violated: {}", db_err);
                AppError::Conflict("Username or email already registered".into())
            }
            _ => {
                log::error!("Database error: {}", error);
                AppError::DatabaseError(error.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Could not validate user: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        log::error!("bcrypt failure: {}", error);
        AppError::InternalServerError(error.to_string())
    }
}
