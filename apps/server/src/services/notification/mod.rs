//! Push notification delivery.
//!
//! Delivery goes through the [`PushNotifier`] trait so the alert service does
//! not depend on a concrete provider. Pushover is the only implementation.

pub mod pushover;

use async_trait::async_trait;

use crate::models::{AlertMessage, PushReceipt};

pub use pushover::PushoverNotifier;

// =============================================================================
// Push Errors
// =============================================================================

/// Why a push could not be delivered
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The request never got a response (DNS, TLS, timeout, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered but refused the message
    #[error("provider rejected message (HTTP {status}): {}", .errors.join(", "))]
    Api { status: u16, errors: Vec<String> },

    /// The provider answered with something we could not understand
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// Notifier Trait
// =============================================================================

/// A push notification provider
#[async_trait]
pub trait PushNotifier: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &'static str;

    /// Delivers one message; no retries
    async fn send(&self, message: &AlertMessage) -> Result<PushReceipt, PushError>;
}
