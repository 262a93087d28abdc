//! Alert message formatting.
//!
//! Turns a validated [`AlarmEvent`] into the title and body pushed to the
//! phone. Wording comes from a per-locale table mapping trigger keys to a
//! display phrase and its grammatical gender; unknown keys are shown verbatim.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use std::time::Duration;

use crate::config::{AlertConfig, PushoverConfig};
use crate::models::{AlarmEvent, AlertMessage, Priority};

// =============================================================================
// Localization Tables
// =============================================================================

/// Display phrase for a trigger key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerPhrase {
    pub text: &'static str,
    pub feminine: bool,
}

const fn masculine(text: &'static str) -> TriggerPhrase {
    TriggerPhrase {
        text,
        feminine: false,
    }
}

const fn feminine(text: &'static str) -> TriggerPhrase {
    TriggerPhrase {
        text,
        feminine: true,
    }
}

const ENGLISH_TRIGGERS: &[(&str, TriggerPhrase)] = &[
    ("person", masculine("person")),
    ("vehicle", masculine("vehicle")),
    ("animal", masculine("animal")),
    ("motion", masculine("motion")),
    ("package", masculine("package")),
    ("ring", masculine("doorbell ring")),
    ("face", masculine("face")),
    ("licensePlate", masculine("license plate")),
];

const FRENCH_TRIGGERS: &[(&str, TriggerPhrase)] = &[
    ("person", feminine("Personne")),
    ("vehicle", masculine("Véhicule")),
    ("animal", masculine("Animal")),
    ("motion", masculine("Mouvement")),
    ("package", masculine("Colis")),
    ("ring", feminine("Sonnette")),
    ("face", masculine("Visage")),
    ("licensePlate", feminine("Plaque d'immatriculation")),
];

// =============================================================================
// Locale
// =============================================================================

/// Formatting strategy, selected by `ALERT_LOCALE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    French,
}

impl Locale {
    pub fn title(self) -> &'static str {
        match self {
            Locale::English => "UniFi Protect Alert",
            Locale::French => "Alerte UniFi Protect",
        }
    }

    fn table(self) -> &'static [(&'static str, TriggerPhrase)] {
        match self {
            Locale::English => ENGLISH_TRIGGERS,
            Locale::French => FRENCH_TRIGGERS,
        }
    }

    fn unknown(self) -> TriggerPhrase {
        match self {
            Locale::English => masculine("unknown"),
            Locale::French => masculine("Inconnu"),
        }
    }

    /// Looks up a known trigger key
    pub fn lookup(self, key: &str) -> Option<TriggerPhrase> {
        self.table()
            .iter()
            .find(|(known, _)| *known == key)
            .map(|(_, phrase)| *phrase)
    }

    fn detected(self, feminine: bool) -> &'static str {
        match (self, feminine) {
            (Locale::English, _) => "detected",
            (Locale::French, false) => "détecté",
            (Locale::French, true) => "détectée",
        }
    }

    fn time_pattern(self) -> &'static str {
        match self {
            Locale::English => "%I:%M %p",
            Locale::French => "%H:%M",
        }
    }

    fn body(self, alarm: &str, trigger: &str, verb: &str, time: &str) -> String {
        match self {
            Locale::English => format!("🚨 {} - {} {} at {}", alarm, trigger, verb, time),
            Locale::French => format!("🚨 {} - {} {} à {}", alarm, trigger, verb, time),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "fr" | "french" => Ok(Locale::French),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

// =============================================================================
// Formatter
// =============================================================================

/// Builds [`AlertMessage`]s from validated events
#[derive(Debug, Clone)]
pub struct AlertFormatter {
    locale: Locale,
    timezone: Tz,
    priority: Priority,
    retry: Duration,
    expire: Duration,
}

impl AlertFormatter {
    pub fn new(alert: &AlertConfig, pushover: &PushoverConfig) -> Self {
        Self {
            locale: alert.locale,
            timezone: alert.timezone,
            priority: pushover.priority,
            retry: pushover.retry,
            expire: pushover.expire,
        }
    }

    /// Formats an event; `now` is only rendered when the event carries no timestamp
    pub fn format(&self, event: &AlarmEvent, now: DateTime<Utc>) -> AlertMessage {
        let key = event.primary_trigger().map(|t| t.key.as_str());
        let trigger = self.trigger_text(key);

        let detected_at = detection_time(event.timestamp_millis());
        let local = detected_at.unwrap_or(now).with_timezone(&self.timezone);
        let time = local.format(self.locale.time_pattern()).to_string();

        let body = self.locale.body(
            event.alarm_name(),
            trigger.0,
            self.locale.detected(trigger.1),
            &time,
        );

        // Retry and expire are rejected by the provider for non-emergency priorities
        let (retry, expire) = if self.priority.is_emergency() {
            (Some(self.retry), Some(self.expire))
        } else {
            (None, None)
        };

        AlertMessage {
            title: self.locale.title().to_string(),
            body,
            priority: self.priority,
            timestamp: detected_at.map(|at| at.timestamp()),
            retry,
            expire,
        }
    }

    /// Display text and gender flag for a trigger key
    fn trigger_text<'a>(&self, key: Option<&'a str>) -> (&'a str, bool) {
        match key.filter(|k| !k.is_empty()) {
            Some(key) => match self.locale.lookup(key) {
                Some(phrase) => (phrase.text, phrase.feminine),
                // Unrecognized categories are shown as sent
                None => (key, false),
            },
            None => {
                let unknown = self.locale.unknown();
                (unknown.text, unknown.feminine)
            }
        }
    }
}

/// Converts epoch milliseconds; `None` for missing or out-of-range values
fn detection_time(timestamp_millis: i64) -> Option<DateTime<Utc>> {
    if timestamp_millis <= 0 {
        return None;
    }
    DateTime::from_timestamp_millis(timestamp_millis)
}
