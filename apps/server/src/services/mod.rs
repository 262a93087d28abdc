pub mod alert;
pub mod formatter;
pub mod notification;

pub use alert::AlertService;
pub use formatter::{AlertFormatter, Locale};
pub use notification::{PushError, PushNotifier, PushoverNotifier};
