//! Alert service: formats a validated alarm and dispatches it.
//!
//! This service handles:
//! - Building the push message from an [`AlarmEvent`]
//! - Delivering it once through the configured [`PushNotifier`]
//! - Logging the outcome for correlation with provider-side logs

use chrono::Utc;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{AlarmEvent, PushReceipt};
use crate::services::formatter::AlertFormatter;
use crate::services::notification::{PushError, PushNotifier, PushoverNotifier};

/// Shared, immutable alert pipeline (one per process)
#[derive(Clone)]
pub struct AlertService {
    formatter: AlertFormatter,
    notifier: Arc<dyn PushNotifier>,
}

impl AlertService {
    pub fn new(formatter: AlertFormatter, notifier: Arc<dyn PushNotifier>) -> Self {
        Self {
            formatter,
            notifier,
        }
    }

    /// Wires the Pushover notifier from configuration
    pub fn from_config(config: &Config) -> Result<Self, PushError> {
        let notifier = PushoverNotifier::new(config.pushover.clone())?;
        let formatter = AlertFormatter::new(&config.alert, &config.pushover);

        Ok(Self::new(formatter, Arc::new(notifier)))
    }

    /// Formats and sends one alert. Failures are reported once, never retried.
    pub async fn dispatch(&self, event: &AlarmEvent) -> AppResult<PushReceipt> {
        let message = self.formatter.format(event, Utc::now());
        let trigger = event
            .primary_trigger()
            .map(|t| t.key.as_str())
            .unwrap_or("unknown");

        log::info!(
            "Sending {} notification: alarm={:?} trigger={} priority={}",
            self.notifier.name(),
            event.alarm_name(),
            trigger,
            message.priority
        );

        match self.notifier.send(&message).await {
            Ok(receipt) => {
                log::info!(
                    "Notification sent: alarm={:?} request_id={}",
                    event.alarm_name(),
                    receipt.request_id
                );
                Ok(receipt)
            }
            Err(e) => {
                log::error!(
                    "Failed to send {} notification: alarm={:?} error={}",
                    self.notifier.name(),
                    event.alarm_name(),
                    e
                );
                Err(AppError::DeliveryFailed(e.to_string()))
            }
        }
    }
}
