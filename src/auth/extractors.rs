use actix_web::dev::Payload;
use actix_web::{http::header, web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::{Claims, TokenKeys};
use crate::error::AppError;

/// Identity of the caller, taken from a validated bearer token.
///
/// Behind `AuthMiddleware` the claims are already in the request extensions.
/// Elsewhere the extractor validates the `Authorization` header itself, so a
/// handler can require a caller without the middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
    pub id: i64,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            id: claims.id,
        }
    }
}

fn current_user(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    if let Some(claims) = req.extensions().get::<Claims>().cloned() {
        return Ok(claims.into());
    }

    let keys = req
        .app_data::<web::Data<TokenKeys>>()
        .ok_or_else(|| AppError::InternalServerError("Token keys are not configured".into()))?;
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;

    keys.validate(token.trim()).map(CurrentUser::from)
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(current_user(req).map_err(ActixError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Duration;

    fn keys() -> TokenKeys {
        TokenKeys::new("extractor-secret", Duration::minutes(20))
    }

    #[actix_rt::test]
    async fn test_current_user_from_extensions() {
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(Claims {
            sub: "alice".into(),
            id: 123,
            exp: 0,
        });

        let user = CurrentUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(
            user,
            CurrentUser {
                username: "alice".into(),
                id: 123
            }
        );
    }

    #[actix_rt::test]
    async fn test_current_user_from_header() {
        let keys = keys();
        let token = keys.issue_default("bob", 9).unwrap();
        let req = test::TestRequest::default()
            .app_data(web::Data::new(keys))
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let user = CurrentUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(user.username, "bob");
        assert_eq!(user.id, 9);
    }

    #[actix_rt::test]
    async fn test_current_user_without_token() {
        let req = test::TestRequest::default()
            .app_data(web::Data::new(keys()))
            .to_http_request();

        let err = CurrentUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }
}
