pub mod alert;
pub mod webhook;

pub use alert::{AlertMessage, Priority, PushReceipt};
pub use webhook::{Alarm, AlarmEvent, Condition, ConditionDetail, Source, Trigger, WebhookPayload};
