pub mod auth;
pub mod health;
pub mod todos;

use actix_web::{
    error::{self, JsonPayloadError, UrlencodedError},
    web,
};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers the `/auth` and `/todo` scopes.
///
/// Expects `web::Data<SqlitePool>`, `web::Data<TokenKeys>` and
/// `web::Data<Config>` to be registered on the `App`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| json_error(err)))
        .app_data(web::FormConfig::default().error_handler(|err, _req| form_error(err)))
        .app_data(
            web::PathConfig::default().error_handler(|err, _req| bad_request(err.to_string())),
        )
        .service(
            web::scope("/auth")
                .service(auth::create_user)
                .service(auth::login_for_access_token),
        )
        .service(
            web::scope("/todo")
                .wrap(AuthMiddleware)
                .service(todos::read_all)
                .service(todos::read_todo)
                .service(todos::create_todo)
                .service(todos::update_todo)
                .service(todos::delete_todo),
        );
}

/// Well-formed JSON with missing or mistyped fields is a 422; anything that
/// is not JSON at all stays a 400.
fn json_error(err: JsonPayloadError) -> error::Error {
    match &err {
        JsonPayloadError::Deserialize(json_err) if json_err.is_data() => {
            AppError::ValidationError(err.to_string()).into()
        }
        _ => bad_request(err.to_string()),
    }
}

fn form_error(err: UrlencodedError) -> error::Error {
    match &err {
        UrlencodedError::Parse(_) => AppError::ValidationError(err.to_string()).into(),
        _ => bad_request(err.to_string()),
    }
}

fn bad_request(msg: String) -> error::Error {
    AppError::BadRequest(msg).into()
}
