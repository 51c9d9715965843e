use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// `{id?, message}` acknowledgement returned by create/update/delete endpoints.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { id: None, message: message.into() }
    }

    pub fn with_id(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self { id: Some(id.into()), message: message.into() }
    }
}

/// `{message, data}` envelope used by the measurement endpoints.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Envelope<T> {
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data: Some(data) }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self { message: message.into(), data: None }
    }
}
