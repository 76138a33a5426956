//! Captured request metadata.

use crate::types::request::PostData;
use serde::{Deserialize, Serialize};

/// Latest observed request for an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedRequest {
    /// Request body, if any
    pub post_data: Option<PostData>,
    /// Full request URL
    pub url: String,
    /// Observation time, milliseconds since the Unix epoch
    pub update_timestamp: i64,
}
