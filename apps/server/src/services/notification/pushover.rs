//! Pushover notification dispatcher.
//!
//! Posts messages to the Pushover messages API as JSON. See
//! <https://pushover.net/api> for the field reference.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{PushError, PushNotifier};
use crate::config::PushoverConfig;
use crate::models::{AlertMessage, PushReceipt};

/// Provider limit on the title, in characters
const MAX_TITLE_CHARS: usize = 250;

/// Provider limit on the message, in characters
const MAX_MESSAGE_CHARS: usize = 1024;

/// Request body for `POST /1/messages.json`
#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    token: &'a str,
    user: &'a str,
    message: String,
    title: String,
    priority: i8,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expire: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<&'a str>,
}

/// Response body; `status` is 1 on success
#[derive(Debug, Deserialize)]
struct MessageResponse {
    status: i32,
    #[serde(default)]
    request: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

/// Pushover notification dispatcher
pub struct PushoverNotifier {
    client: reqwest::Client,
    config: PushoverConfig,
}

impl PushoverNotifier {
    /// Creates a new Pushover notifier
    pub fn new(config: PushoverConfig) -> Result<Self, PushError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PushError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn build_request<'a>(&'a self, message: &AlertMessage) -> MessageRequest<'a> {
        MessageRequest {
            token: &self.config.app_token,
            user: &self.config.user_key,
            message: truncate_chars(&message.body, MAX_MESSAGE_CHARS),
            title: truncate_chars(&message.title, MAX_TITLE_CHARS),
            priority: message.priority.as_i8(),
            timestamp: message.timestamp,
            retry: message.retry.map(|d| d.as_secs()),
            expire: message.expire.map(|d| d.as_secs()),
            sound: self.config.sound.as_deref(),
            device: self.config.device.as_deref(),
        }
    }
}

#[async_trait]
impl PushNotifier for PushoverNotifier {
    fn name(&self) -> &'static str {
        "pushover"
    }

    async fn send(&self, message: &AlertMessage) -> Result<PushReceipt, PushError> {
        let request = self.build_request(message);

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PushError::Transport("request timed out".to_string())
                } else if e.is_connect() {
                    PushError::Transport("connection failed".to_string())
                } else {
                    PushError::Transport(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PushError::Transport(format!("failed to read response: {}", e)))?;

        let parsed: Option<MessageResponse> = serde_json::from_str(&text).ok();

        match parsed {
            Some(body) if status.is_success() && body.status == 1 => {
                let request_id = body.request.filter(|id| !id.is_empty()).ok_or_else(|| {
                    PushError::InvalidResponse("missing request identifier".to_string())
                })?;
                Ok(PushReceipt { request_id })
            }
            Some(body) => Err(PushError::Api {
                status: status.as_u16(),
                errors: body.errors,
            }),
            None if status.is_success() => Err(PushError::InvalidResponse(format!(
                "unexpected body: {}",
                truncate_chars(&text, 200)
            ))),
            None => Err(PushError::Api {
                status: status.as_u16(),
                errors: if text.is_empty() { Vec::new() } else { vec![text] },
            }),
        }
    }
}

/// Cuts a string to at most `max` characters on a char boundary
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
