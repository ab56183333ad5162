use crate::{
    auth::{authenticate_user, register_user, RegisterRequest, TokenKeys, TokenRequest, TokenResponse},
    config::Config,
    db::DbConn,
    error::AppError,
    models::PublicUser,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates the account and returns it without the password hash.
///
/// ## Responses:
/// - `201 Created`: the new user.
/// - `409 Conflict`: username or email already taken.
/// - `422 Unprocessable Entity`: a field failed validation.
#[post("/auth")]
pub async fn create_user(
    mut db: DbConn,
    config: web::Data<Config>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user = register_user(&mut db, &register_data, config.bcrypt_cost).await?;

    Ok(HttpResponse::Created().json(PublicUser::from(user)))
}

/// Login for an access token
///
/// Takes an OAuth2 password-grant form and returns a bearer token valid for
/// the configured lifetime.
///
/// ## Responses:
/// - `200 OK`: `{"access_token": ..., "token_type": "bearer"}`.
/// - `401 Unauthorized`: unknown user or wrong password.
#[post("/token")]
pub async fn login_for_access_token(
    mut db: DbConn,
    keys: web::Data<TokenKeys>,
    form: web::Form<TokenRequest>,
) -> Result<impl Responder, AppError> {
    form.validate()?;

    let user = authenticate_user(&mut db, &form.username, &form.password)
        .await?
        .ok_or_else(|| {
            log::info!("Failed login for {}", form.username);
            AppError::Unauthorized("Could not validate user".into())
        })?;

    let token = keys.issue_default(&user.username, user.id)?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}
