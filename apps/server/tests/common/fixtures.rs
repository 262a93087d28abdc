//! Test fixtures and data builders
//!
//! Provides reusable webhook payloads and configurations.

use chrono_tz::Tz;
use protect_bridge::config::{AlertConfig, PushoverConfig};
use protect_bridge::models::{AlarmEvent, Priority, WebhookPayload};
use protect_bridge::services::Locale;
use serde_json::{json, Value};
use std::time::Duration;

/// 2024-09-09T11:58:27.267Z
pub const SAMPLE_TIMESTAMP_MS: i64 = 1725883107267;

/// Builds Alarm Manager payloads with sensible defaults
pub struct WebhookBuilder {
    name: Option<String>,
    triggers: Vec<Value>,
    sources: Vec<Value>,
    conditions: Vec<Value>,
    timestamp: Option<i64>,
}

impl Default for WebhookBuilder {
    fn default() -> Self {
        Self {
            name: Some("Front Door".to_string()),
            triggers: vec![json!({ "key": "person", "device": "28704E113F33" })],
            sources: Vec::new(),
            conditions: Vec::new(),
            timestamp: Some(SAMPLE_TIMESTAMP_MS),
        }
    }
}

impl WebhookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn with_trigger(mut self, key: &str) -> Self {
        self.triggers = vec![json!({ "key": key })];
        self
    }

    pub fn without_triggers(mut self) -> Self {
        self.triggers.clear();
        self
    }

    pub fn with_source(mut self, device: &str, source_type: &str) -> Self {
        self.sources
            .push(json!({ "device": device, "type": source_type }));
        self
    }

    pub fn with_condition(mut self, condition_type: &str, source: &str) -> Self {
        self.conditions.push(json!({
            "condition": { "type": condition_type, "source": source }
        }));
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> Value {
        let mut alarm = json!({ "triggers": self.triggers });

        if let Some(name) = self.name {
            alarm["name"] = json!(name);
        }
        if !self.sources.is_empty() {
            alarm["sources"] = json!(self.sources);
        }
        if !self.conditions.is_empty() {
            alarm["conditions"] = json!(self.conditions);
        }

        let mut payload = json!({ "alarm": alarm });
        if let Some(timestamp) = self.timestamp {
            payload["timestamp"] = json!(timestamp);
        }
        payload
    }

    pub fn build_bytes(self) -> Vec<u8> {
        serde_json::to_vec(&self.build()).expect("payload serializes")
    }
}

/// Decodes and validates a JSON payload, panicking on invalid input
pub fn event_from(payload: Value) -> AlarmEvent {
    serde_json::from_value::<WebhookPayload>(payload)
        .expect("payload decodes")
        .validate()
        .expect("payload is valid")
}

pub fn test_pushover_config(priority: Priority) -> PushoverConfig {
    PushoverConfig {
        app_token: "test-app-token".to_string(),
        user_key: "test-user-key".to_string(),
        priority,
        retry: Duration::from_secs(60),
        expire: Duration::from_secs(3600),
        sound: None,
        device: None,
        api_url: "http://127.0.0.1:9/1/messages.json".to_string(),
        request_timeout: Duration::from_secs(5),
    }
}

pub fn test_alert_config(locale: Locale, timezone: Tz) -> AlertConfig {
    AlertConfig { locale, timezone }
}
