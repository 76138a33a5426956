//! Capture log of the latest request observed per operation.

use crate::types::capture::CapturedRequest;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Latest captured request per operation key.
///
/// Entries are overwritten, never appended. Nothing is evicted until [`CaptureLog::clear`].
#[derive(Debug, Default)]
pub struct CaptureLog {
    entries: RwLock<HashMap<String, CapturedRequest>>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `captured` as the latest entry for `operation`, returning the replaced entry.
    pub fn record(
        &self,
        operation: impl Into<String>,
        captured: CapturedRequest,
    ) -> Option<CapturedRequest> {
        self.entries.write().insert(operation.into(), captured)
    }

    pub fn latest(&self, operation: &str) -> Option<CapturedRequest> {
        self.entries.read().get(operation).cloned()
    }

    /// Copy of every entry
    pub fn snapshot(&self) -> HashMap<String, CapturedRequest> {
        self.entries.read().clone()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
