use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Liveness check - is the process running?
/// Answers every method with 200.
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse { status: "healthy" })
}

/// Configures the health route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::route().to(liveness));
}
