//! Mock registry for operation bindings and mock case bodies.
//!
//! The registry is filled by test-case setup before the page issues requests. The
//! interception engine only reads from it.

use crate::types::mock::MockBody;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Registry of mock bindings and mock case bodies.
///
/// `MockRegistry` keeps two tables:
/// - operation key → mock case ID (one binding per operation, last write wins)
/// - mock case ID → response body
///
/// Shared between sessions through `Arc`; every access takes a short lock.
#[derive(Debug, Default)]
pub struct MockRegistry {
    /// Map of operation key to mock case ID
    bindings: RwLock<HashMap<String, String>>,
    /// Map of mock case ID to body
    cases: RwLock<HashMap<String, MockBody>>,
}

impl MockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an operation to a mock case
    pub fn bind(&self, operation: impl Into<String>, case_id: impl Into<String>) {
        self.bindings.write().insert(operation.into(), case_id.into());
    }

    /// Bind multiple operations
    pub fn bind_all<I, K, V>(&self, bindings: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = self.bindings.write();
        for (operation, case_id) in bindings {
            table.insert(operation.into(), case_id.into());
        }
    }

    /// Remove an operation binding, returning the case it pointed to
    pub fn unbind(&self, operation: &str) -> Option<String> {
        self.bindings.write().remove(operation)
    }

    /// Add a mock case body
    pub fn add_case(&self, case_id: impl Into<String>, body: impl Into<MockBody>) {
        self.cases.write().insert(case_id.into(), body.into());
    }

    /// Add multiple mock case bodies
    pub fn add_cases<I, K>(&self, cases: I)
    where
        I: IntoIterator<Item = (K, MockBody)>,
        K: Into<String>,
    {
        let mut table = self.cases.write();
        for (case_id, body) in cases {
            table.insert(case_id.into(), body);
        }
    }

    /// Mock case bound to an operation
    pub fn binding(&self, operation: &str) -> Option<String> {
        self.bindings.read().get(operation).cloned()
    }

    /// Whether an operation has a binding
    pub fn is_bound(&self, operation: &str) -> bool {
        self.bindings.read().contains_key(operation)
    }

    /// Body of a mock case
    pub fn case_body(&self, case_id: &str) -> Option<MockBody> {
        self.cases.read().get(case_id).cloned()
    }

    /// Resolve the body served for an operation.
    ///
    /// Returns `None` when the operation is unbound or its case has no body.
    pub fn resolve(&self, operation: &str) -> Option<MockBody> {
        let case_id = self.binding(operation)?;
        self.case_body(&case_id)
    }

    /// Drop all bindings, keeping case bodies
    pub fn clear_bindings(&self) {
        self.bindings.write().clear();
    }

    /// Drop bindings and case bodies
    pub fn clear(&self) {
        self.bindings.write().clear();
        self.cases.write().clear();
    }
}
