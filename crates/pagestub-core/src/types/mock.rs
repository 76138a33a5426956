//! Mock case bodies and the response served for a mocked request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status served for every mocked response.
pub const MOCK_STATUS: u16 = 200;

/// Content type served for every mocked response.
pub const MOCK_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Registered body of a mock case.
///
/// A JSON string in a case file is taken as pre-serialized text and served as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MockBody {
    Text(String),
    Json(Value),
}

impl MockBody {
    /// Body as JSON text.
    pub fn to_body_text(&self) -> String {
        match self {
            MockBody::Text(text) => text.clone(),
            MockBody::Json(value) => value.to_string(),
        }
    }
}

impl From<Value> for MockBody {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => MockBody::Text(text),
            other => MockBody::Json(other),
        }
    }
}

impl From<&str> for MockBody {
    fn from(text: &str) -> Self {
        MockBody::Text(text.to_string())
    }
}

impl From<String> for MockBody {
    fn from(text: String) -> Self {
        MockBody::Text(text)
    }
}

/// Response used to fulfill a mocked request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl MockResponse {
    /// JSON response with the fixed mock status and content type.
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: MOCK_STATUS,
            content_type: MOCK_CONTENT_TYPE.to_string(),
            body: body.into(),
        }
    }

    /// Response headers as name/value pairs.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![("Content-Type".to_string(), self.content_type.clone())]
    }
}
