//! Push notifier doubles
//!
//! Stand-ins for the push provider that record or reject messages.

use async_trait::async_trait;
use protect_bridge::models::{AlertMessage, PushReceipt};
use protect_bridge::services::{PushError, PushNotifier};
use std::sync::Mutex;

/// Accepts every message and keeps a copy
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<AlertMessage>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<AlertMessage> {
        self.sent.lock().expect("notifier lock poisoned").clone()
    }
}

#[async_trait]
impl PushNotifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, message: &AlertMessage) -> Result<PushReceipt, PushError> {
        let mut sent = self.sent.lock().expect("notifier lock poisoned");
        sent.push(message.clone());
        Ok(PushReceipt {
            request_id: format!("req-{}", sent.len()),
        })
    }
}

/// Fails every message as if the network were down
#[derive(Default)]
pub struct FailingNotifier {
    attempts: Mutex<usize>,
}

impl FailingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().expect("notifier lock poisoned")
    }
}

#[async_trait]
impl PushNotifier for FailingNotifier {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn send(&self, _message: &AlertMessage) -> Result<PushReceipt, PushError> {
        *self.attempts.lock().expect("notifier lock poisoned") += 1;
        Err(PushError::Transport("connection failed".to_string()))
    }
}
