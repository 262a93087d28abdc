use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Application errors
///
/// Every variant maps to a plain-text HTTP response. All but `DeliveryFailed` are
/// caused by the caller; `DeliveryFailed` keeps the provider detail for logs
/// and answers with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("invalid JSON payload: {0}")]
    InvalidPayload(String),

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("payload exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("failed to send notification: {0}")]
    DeliveryFailed(String),
}

impl AppError {
    /// Body returned to the client
    pub fn public_message(&self) -> String {
        match self {
            AppError::MethodNotAllowed => "method not allowed".to_string(),
            AppError::InvalidPayload(_) => "invalid JSON payload".to_string(),
            AppError::MissingField(field) => format!("missing {}", field),
            AppError::PayloadTooLarge(_) => "payload too large".to_string(),
            AppError::DeliveryFailed(_) => "failed to send notification".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::DeliveryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());

        if let AppError::MethodNotAllowed = self {
            response.insert_header(("Allow", "POST"));
        }

        response
            .content_type("text/plain; charset=utf-8")
            .body(self.public_message())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
