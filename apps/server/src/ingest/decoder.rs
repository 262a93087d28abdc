use actix_web::http::Method;

use crate::error::{AppError, AppResult};
use crate::models::{AlarmEvent, WebhookPayload};

/// Largest webhook body accepted (Alarm Manager may embed thumbnails)
pub const MAX_WEBHOOK_SIZE: usize = 16 * 1024 * 1024;

/// Rejects anything but POST. Must run before the body is read.
pub fn ensure_post(method: &Method) -> AppResult<()> {
    if *method != Method::POST {
        log::warn!("Invalid webhook method: {}", method);
        return Err(AppError::MethodNotAllowed);
    }
    Ok(())
}

/// Decodes and validates a webhook body.
///
/// Unknown JSON fields and unknown trigger keys are accepted; `null` counts
/// as absent.
pub fn decode_body(body: &[u8]) -> AppResult<AlarmEvent> {
    let payload: WebhookPayload = serde_json::from_slice(body).map_err(|e| {
        log::error!("Failed to decode webhook payload: {}", e);
        AppError::InvalidPayload(e.to_string())
    })?;

    let trigger_count = payload.alarm.triggers.len();
    let event = payload.validate().inspect_err(|e| {
        log::warn!("Rejected webhook: {} (triggers={})", e, trigger_count);
    })?;

    log::info!(
        "Received webhook: alarm={:?} triggers={} timestamp={}",
        event.alarm_name(),
        event.triggers().len(),
        event.timestamp_millis()
    );

    Ok(event)
}

/// Validates and decodes an Alarm Manager webhook.
///
/// The method is checked before the body is looked at.
pub fn decode_webhook(method: &Method, body: &[u8]) -> AppResult<AlarmEvent> {
    ensure_post(method)?;
    decode_body(body)
}
