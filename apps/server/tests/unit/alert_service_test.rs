//! Unit tests for the alert service
//!
//! Uses notifier doubles to check what is handed to the provider and how
//! failures are surfaced.

use crate::common::{
    capture_logs, event_from, logged, test_alert_config, test_pushover_config, FailingNotifier,
    RecordingNotifier, WebhookBuilder,
};
use chrono_tz::Tz;
use log::Level;
use protect_bridge::error::AppError;
use protect_bridge::models::Priority;
use protect_bridge::services::{AlertFormatter, AlertService, Locale};
use std::sync::Arc;

fn formatter() -> AlertFormatter {
    AlertFormatter::new(
        &test_alert_config(Locale::English, Tz::UTC),
        &test_pushover_config(Priority::Emergency),
    )
}

#[actix_web::test]
async fn test_dispatch_sends_exactly_one_message() {
    let notifier = Arc::new(RecordingNotifier::new());
    let service = AlertService::new(formatter(), notifier.clone());

    let event = event_from(WebhookBuilder::new().build());
    let receipt = service.dispatch(&event).await.unwrap();

    assert_eq!(receipt.request_id, "req-1");

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "UniFi Protect Alert");
    assert!(sent[0].body.contains("Front Door"));
    assert_eq!(sent[0].priority, Priority::Emergency);
}

#[actix_web::test]
async fn test_dispatch_failure_is_delivery_failed() {
    let notifier = Arc::new(FailingNotifier::new());
    let service = AlertService::new(formatter(), notifier.clone());

    let event = event_from(WebhookBuilder::new().build());
    let err = service.dispatch(&event).await.unwrap_err();

    assert!(matches!(err, AppError::DeliveryFailed(_)));
    assert_eq!(err.public_message(), "failed to send notification");
}

#[actix_web::test]
async fn test_dispatch_failure_is_not_retried() {
    let notifier = Arc::new(FailingNotifier::new());
    let service = AlertService::new(formatter(), notifier.clone());

    let event = event_from(WebhookBuilder::new().build());
    let _ = service.dispatch(&event).await;

    assert_eq!(notifier.attempts(), 1);
}

#[actix_web::test]
async fn test_dispatch_failure_logs_alarm_name() {
    capture_logs();
    let notifier = Arc::new(FailingNotifier::new());
    let service = AlertService::new(formatter(), notifier.clone());

    let event = event_from(WebhookBuilder::new().with_name("Front Door North").build());
    let _ = service.dispatch(&event).await;

    let errors = logged(Level::Error, "Front Door North");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("connection failed"));
    assert!(errors[0].target.starts_with("protect_bridge::services::alert"));
}

#[actix_web::test]
async fn test_dispatch_success_logs_request_id() {
    capture_logs();
    let notifier = Arc::new(RecordingNotifier::new());
    let service = AlertService::new(formatter(), notifier.clone());

    let event = event_from(WebhookBuilder::new().with_name("Carport East").build());
    service.dispatch(&event).await.unwrap();

    let sent = logged(Level::Info, "Notification sent: alarm=\"Carport East\"");
    assert_eq!(sent.len(), 1);
    assert!(sent[0].message.contains("request_id=req-1"));
    assert!(logged(Level::Error, "Carport East").is_empty());
}
