use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;

use crate::models::Priority;
use crate::services::formatter::Locale;

/// Default Pushover messages endpoint
pub const DEFAULT_PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Pushover rejects emergency messages retrying more often than this
const MIN_EMERGENCY_RETRY: Duration = Duration::from_secs(30);

/// Pushover rejects emergency messages expiring later than this
const MAX_EMERGENCY_EXPIRE: Duration = Duration::from_secs(10800);

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub pushover: PushoverConfig,
    pub alert: AlertConfig,
    /// Default filter handed to env_logger
    pub log_level: String,
}

/// Push provider credentials and delivery parameters
#[derive(Debug, Clone)]
pub struct PushoverConfig {
    pub app_token: String,
    pub user_key: String,
    pub priority: Priority,
    /// Emergency retry interval
    pub retry: Duration,
    /// Emergency expiration
    pub expire: Duration,
    pub sound: Option<String>,
    pub device: Option<String>,
    pub api_url: String,
    pub request_timeout: Duration,
}

/// Message formatting options
#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub locale: Locale,
    pub timezone: Tz,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            pushover: PushoverConfig::from_env()?,
            alert: AlertConfig::from_env()?,
            log_level: env::var("LOG_LEVEL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl PushoverConfig {
    /// Load push provider configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_token = required("PUSHOVER_APP_TOKEN")?;
        let user_key = required("PUSHOVER_USER_KEY")?;

        let priority = match optional("PUSHOVER_PRIORITY") {
            Some(raw) => {
                let value: i8 = raw
                    .parse()
                    .map_err(|_| ConfigError::Invalid("PUSHOVER_PRIORITY", raw.clone()))?;
                Priority::try_from(value)
                    .map_err(|_| ConfigError::Invalid("PUSHOVER_PRIORITY", raw))?
            }
            None => Priority::Emergency,
        };

        let retry = seconds("PUSHOVER_RETRY", 60)?;
        let expire = seconds("PUSHOVER_EXPIRE", 3600)?;

        // Only enforced when the parameters are actually sent
        if priority.is_emergency() {
            if retry < MIN_EMERGENCY_RETRY {
                return Err(ConfigError::RetryTooShort);
            }
            if expire > MAX_EMERGENCY_EXPIRE {
                return Err(ConfigError::ExpireTooLong);
            }
        }

        let api_url = optional("PUSHOVER_API_URL")
            .unwrap_or_else(|| DEFAULT_PUSHOVER_API_URL.to_string());
        let parsed = url::Url::parse(&api_url)
            .map_err(|_| ConfigError::Invalid("PUSHOVER_API_URL", api_url.clone()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::Invalid("PUSHOVER_API_URL", api_url));
        }

        Ok(Self {
            app_token,
            user_key,
            priority,
            retry,
            expire,
            sound: optional("PUSHOVER_SOUND"),
            device: optional("PUSHOVER_DEVICE"),
            api_url,
            request_timeout: seconds("PUSHOVER_TIMEOUT_SECS", 30)?,
        })
    }
}

impl AlertConfig {
    /// Load formatting configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let locale = match optional("ALERT_LOCALE") {
            Some(raw) => {
                Locale::from_str(&raw).map_err(|_| ConfigError::Invalid("ALERT_LOCALE", raw))?
            }
            None => Locale::English,
        };

        let timezone = match optional("ALERT_TIMEZONE") {
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|_| ConfigError::Invalid("ALERT_TIMEZONE", raw))?,
            None => Tz::UTC,
        };

        Ok(Self { locale, timezone })
    }
}

/// Reads a variable, treating empty values as unset
fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn seconds(name: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match optional(name) {
        Some(raw) => raw
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Invalid(name, raw)),
        None => Ok(Duration::from_secs(default)),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort,
    Missing(&'static str),
    Invalid(&'static str, String),
    RetryTooShort,
    ExpireTooLong,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid number"),
            ConfigError::Missing(name) => write!(f, "{} is required", name),
            ConfigError::Invalid(name, value) => write!(f, "invalid {}: {:?}", name, value),
            ConfigError::RetryTooShort => write!(
                f,
                "PUSHOVER_RETRY must be at least {} seconds for emergency priority",
                MIN_EMERGENCY_RETRY.as_secs()
            ),
            ConfigError::ExpireTooLong => write!(
                f,
                "PUSHOVER_EXPIRE must be at most {} seconds for emergency priority",
                MAX_EMERGENCY_EXPIRE.as_secs()
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
