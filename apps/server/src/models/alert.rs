//! Outbound alert models.
//!
//! An `AlertMessage` is built fresh for every dispatch and handed to a
//! [`PushNotifier`](crate::services::notification::PushNotifier).

use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// Priority Enum
// =============================================================================

/// Pushover message priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Priority {
    Lowest,
    Low,
    Normal,
    High,
    /// Repeats until acknowledged; requires `retry` and `expire`
    Emergency,
}

impl Priority {
    pub fn as_i8(self) -> i8 {
        match self {
            Priority::Lowest => -2,
            Priority::Low => -1,
            Priority::Normal => 0,
            Priority::High => 1,
            Priority::Emergency => 2,
        }
    }

    pub fn is_emergency(self) -> bool {
        self == Priority::Emergency
    }
}

impl From<Priority> for i8 {
    fn from(priority: Priority) -> Self {
        priority.as_i8()
    }
}

impl TryFrom<i8> for Priority {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -2 => Ok(Priority::Lowest),
            -1 => Ok(Priority::Low),
            0 => Ok(Priority::Normal),
            1 => Ok(Priority::High),
            2 => Ok(Priority::Emergency),
            other => Err(format!("priority must be between -2 and 2, got {}", other)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

// =============================================================================
// Alert Message
// =============================================================================

/// Notification ready to be pushed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub title: String,
    pub body: String,
    pub priority: Priority,
    /// Unix timestamp (seconds) of the detection, if the event carried one
    pub timestamp: Option<i64>,
    /// Only set for emergency priority
    pub retry: Option<Duration>,
    /// Only set for emergency priority
    pub expire: Option<Duration>,
}

/// Successful delivery acknowledgement from the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReceipt {
    /// Provider-assigned request identifier
    pub request_id: String,
}
