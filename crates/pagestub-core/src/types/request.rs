//! Requests issued by a page, as seen by the interception engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource type declared by the browser for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Document,
    Stylesheet,
    Image,
    Media,
    Font,
    Script,
    TextTrack,
    Xhr,
    Fetch,
    EventSource,
    WebSocket,
    Manifest,
    Other,
}

impl ResourceType {
    /// Only `fetch` and `xhr` requests may be answered from a mock case.
    pub fn is_mockable(&self) -> bool {
        matches!(self, ResourceType::Fetch | ResourceType::Xhr)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Document => "document",
            ResourceType::Stylesheet => "stylesheet",
            ResourceType::Image => "image",
            ResourceType::Media => "media",
            ResourceType::Font => "font",
            ResourceType::Script => "script",
            ResourceType::TextTrack => "texttrack",
            ResourceType::Xhr => "xhr",
            ResourceType::Fetch => "fetch",
            ResourceType::EventSource => "eventsource",
            ResourceType::WebSocket => "websocket",
            ResourceType::Manifest => "manifest",
            ResourceType::Other => "other",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = std::convert::Infallible;

    /// Unrecognized names map to [`ResourceType::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "document" => ResourceType::Document,
            "stylesheet" => ResourceType::Stylesheet,
            "image" => ResourceType::Image,
            "media" => ResourceType::Media,
            "font" => ResourceType::Font,
            "script" => ResourceType::Script,
            "texttrack" => ResourceType::TextTrack,
            "xhr" => ResourceType::Xhr,
            "fetch" => ResourceType::Fetch,
            "eventsource" => ResourceType::EventSource,
            "websocket" => ResourceType::WebSocket,
            "manifest" => ResourceType::Manifest,
            _ => ResourceType::Other,
        })
    }
}

/// Request body. Text when the browser reports valid UTF-8, raw bytes otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostData {
    Text(String),
    Binary(Vec<u8>),
}

impl PostData {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => PostData::Text(text),
            Err(err) => PostData::Binary(err.into_bytes()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PostData::Text(text) => text.as_bytes(),
            PostData::Binary(bytes) => bytes,
        }
    }
}

/// Request about to leave the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterceptedRequest {
    /// Absolute request URL
    pub url: String,
    /// HTTP method
    pub method: String,
    /// Declared resource type
    pub resource_type: ResourceType,
    /// Request body, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_data: Option<PostData>,
}

impl InterceptedRequest {
    /// `GET` request without a body.
    pub fn get(url: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            resource_type,
            post_data: None,
        }
    }

    /// `POST` request carrying a text body.
    pub fn post(
        url: impl Into<String>,
        resource_type: ResourceType,
        body: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            method: "POST".to_string(),
            resource_type,
            post_data: Some(PostData::Text(body.into())),
        }
    }
}
