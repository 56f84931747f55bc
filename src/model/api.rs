use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope wrapping every response body returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiResponse {
    /// HTTP status code, mirrored from the response status line
    pub status: u16,
    /// Human readable summary of the outcome
    pub message: String,
    /// Payload, omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error details, omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl ApiResponse {
    /// Builds an envelope, dropping `data` and `errors` when they carry nothing.
    ///
    /// A value counts as empty when it is `null`, `false`, zero, an empty string, an empty
    /// array or an empty object.
    pub fn new(
        status: u16,
        message: impl Into<String>,
        data: Option<Value>,
        errors: Option<Value>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            data: data.filter(is_present),
            errors: errors.filter(is_present),
        }
    }
}

/// Error detail carried in the `errors` field of the envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// Machine readable error code, e.g. `RESOURCE_NOT_FOUND`
    pub code: String,
    /// Error description, either a string or structured validation details
    #[schema(value_type = Object)]
    pub message: Value,
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
