//! Webhook payload models for the UniFi Protect Alarm Manager.
//!
//! `WebhookPayload` mirrors the JSON document posted by the camera platform.
//! Only `alarm.name` and `alarm.triggers` are checked; everything else is
//! carried through for logging.

use serde::{Deserialize, Deserializer};

use crate::error::{AppError, AppResult};

// =============================================================================
// Wire Payload
// =============================================================================

/// Treats an explicit JSON `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Raw webhook body as sent by Alarm Manager
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub alarm: Alarm,
    /// Epoch milliseconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: i64,
}

/// Alarm definition that fired
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alarm {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<Source>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: Vec<Condition>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub triggers: Vec<Trigger>,
}

/// Device that is part of the alarm scope
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "null_as_default")]
    pub device: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub source_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Condition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub condition: ConditionDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConditionDetail {
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub condition_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
}

/// What actually triggered the alarm (person, vehicle, ...)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Trigger {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default)]
    pub device: Option<String>,
}

// =============================================================================
// Validated Event
// =============================================================================

/// A webhook that passed validation: non-empty name and at least one trigger.
///
/// Fields are private so an `AlarmEvent` can only be obtained through
/// [`WebhookPayload::validate`].
#[derive(Debug, Clone)]
pub struct AlarmEvent {
    alarm_name: String,
    triggers: Vec<Trigger>,
    sources: Vec<Source>,
    conditions: Vec<Condition>,
    timestamp_millis: i64,
}

impl WebhookPayload {
    /// Checks the required fields and converts into an [`AlarmEvent`]
    pub fn validate(self) -> AppResult<AlarmEvent> {
        if self.alarm.name.is_empty() {
            return Err(AppError::MissingField("alarm.name"));
        }

        if self.alarm.triggers.is_empty() {
            return Err(AppError::MissingField("alarm.triggers"));
        }

        Ok(AlarmEvent {
            alarm_name: self.alarm.name,
            triggers: self.alarm.triggers,
            sources: self.alarm.sources,
            conditions: self.alarm.conditions,
            timestamp_millis: self.timestamp,
        })
    }
}

impl AlarmEvent {
    pub fn alarm_name(&self) -> &str {
        &self.alarm_name
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    /// The trigger used for the notification text
    pub fn primary_trigger(&self) -> Option<&Trigger> {
        self.triggers.first()
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }
}
