use serde::Serialize;

/// `{message, data?}` envelope used by every user route.
#[derive(Debug, Serialize)]
pub struct UserEnvelope<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> UserEnvelope<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data: Some(data) }
    }
}

impl UserEnvelope<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self { message: message.into(), data: None }
    }
}
