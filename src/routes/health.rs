use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;

/// Liveness probe.
///
/// Reports `"ok"` when the store answers a trivial query, `"degraded"` with a
/// 503 otherwise.
#[get("/health")]
pub async fn health(pool: web::Data<SqlitePool>) -> impl Responder {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "timestamp": Utc::now()
        })),
        Err(e) => {
            log::error!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "timestamp": Utc::now()
            }))
        }
    }
}
