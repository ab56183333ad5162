#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
    body::{self, MessageBody},
    dev::{Service, ServiceResponse},
    http::StatusCode,
    middleware::Logger,
    test, web, App, Error,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use todoapp::{auth::TokenKeys, config::Config, db, routes};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "Password123!";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        server_port: 0,
        server_host: "127.0.0.1".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_minutes: 20,
        // Minimum cost keeps registration fast.
        bcrypt_cost: 4,
    }
}

pub fn test_keys() -> TokenKeys {
    let config = test_config();
    TokenKeys::new(&config.jwt_secret, config.token_ttl())
}

/// Full application over a fresh in-memory database.
pub async fn spawn_app() -> (
    impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    SqlitePool,
) {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(test_keys()))
            .app_data(web::Data::new(test_config()))
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config),
    )
    .await;

    (app, pool)
}

/// Calls the service and returns status and body, whether the request was
/// answered by a handler or rejected by middleware.
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, web::Bytes)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => {
            let status = resp.status();
            (status, test::read_body(resp).await)
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let bytes = body::to_bytes(resp.into_body())
                .await
                .expect("Failed to read error body");
            (status, bytes)
        }
    }
}

pub fn json_body(bytes: &web::Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        panic!(
            "Body is not JSON ({}): {:?}",
            e,
            String::from_utf8_lossy(bytes)
        )
    })
}

pub fn register_payload(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "first_name": "Test",
        "last_name": "User",
        "password": TEST_PASSWORD,
        "role": "admin"
    })
}

/// Registers `username` and returns the created user.
pub async fn register<S, B>(app: &S, username: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/auth")
        .set_json(register_payload(username))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body)
    );
    json_body(&body)
}

pub async fn login<S, B>(app: &S, username: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form([("username", username), ("password", password)])
        .to_request();
    let (status, body) = send(app, req).await;
    (status, json_body(&body))
}

/// Registers `username` and returns a bearer token for it.
pub async fn register_and_login<S, B>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    register(app, username).await;
    let (status, body) = login(app, username, TEST_PASSWORD).await;
    assert_eq!(status, StatusCode::OK, "Login failed. Body: {}", body);
    body["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}
