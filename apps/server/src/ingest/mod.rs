pub mod decoder;

pub use decoder::{decode_body, decode_webhook, ensure_post, MAX_WEBHOOK_SIZE};
