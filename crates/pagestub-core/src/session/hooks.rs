//! Per-project override hooks.

use crate::error::BoxError;
use crate::session::transport::{Browser, BrowserContext};
use async_trait::async_trait;
use std::sync::Arc;

/// Project-specific overrides consulted before the default behaviour.
///
/// Every method defaults to "no override". When a hook returns a value it is used as-is;
/// when it fails, the error reaches the caller unchanged.
#[async_trait]
pub trait CustomOperation: Send + Sync {
    /// Build a fully custom browser context.
    async fn create_browser_context(
        &self,
        _browser: &dyn Browser,
    ) -> Result<Option<Arc<dyn BrowserContext>>, BoxError> {
        Ok(None)
    }

    /// Resolve a navigation target to a URL, bypassing the page schema.
    async fn page_url(&self, _param: &str) -> Result<Option<String>, BoxError> {
        Ok(None)
    }
}

/// No overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCustomOperation;

impl CustomOperation for NoCustomOperation {}
