use thiserror::Error;

/// Plain-text body returned to callers that do not send a v2 webhook request.
pub const INVALID_WEBHOOK_REQUEST_MESSAGE: &str =
    "Invalid Webhook Request (expecting v2 webhook request)";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FulfillmentError {
    #[error("malformed webhook request: {0}")]
    MalformedRequest(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => INVALID_WEBHOOK_REQUEST_MESSAGE,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. } => correlation_id,
        }
    }
}

impl FulfillmentError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        match self {
            Self::MalformedRequest(message) => {
                InterfaceError::BadRequest { message, correlation_id: correlation_id.into() }
            }
        }
    }
}
