use actix_web::{web, HttpRequest, HttpResponse};
use bytes::BytesMut;
use futures_util::StreamExt;

use crate::error::{AppError, AppResult};
use crate::ingest::{decode_body, ensure_post, MAX_WEBHOOK_SIZE};
use crate::services::AlertService;

/// Response for a delivered alert
#[derive(serde::Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
}

/// /webhook - Alarm Manager entry point (POST only)
pub async fn receive_webhook(
    alerts: web::Data<AlertService>,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    // 1. Method, before any of the body is read
    ensure_post(req.method())?;

    // 2. Body, JSON and required fields
    let body = read_body(payload, MAX_WEBHOOK_SIZE).await?;
    let event = decode_body(&body)?;

    // 3. Format and push
    alerts.dispatch(&event).await?;

    Ok(HttpResponse::Ok().json(WebhookResponse { status: "ok" }))
}

/// Collects the request body, failing once it grows past `limit` bytes
async fn read_body(mut payload: web::Payload, limit: usize) -> AppResult<BytesMut> {
    let mut body = BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| AppError::InvalidPayload(e.to_string()))?;
        if body.len() + chunk.len() > limit {
            log::warn!("Webhook body exceeds {} bytes", limit);
            return Err(AppError::PayloadTooLarge(limit));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// Configures the webhook route
///
/// Every method is routed to the handler so non-POST requests get a 405
/// instead of actix's default 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhook", web::route().to(receive_webhook));
}
