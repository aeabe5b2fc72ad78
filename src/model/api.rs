use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Status reply used by the form-style JSON endpoints
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageDto {
    pub status: String,
    pub message: String,
}

impl MessageDto {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}

/// A one-shot message queued for the next page the user sees
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FlashDto {
    /// One of `success`, `info`, `warning`, `danger`
    pub category: String,
    pub message: String,
}
