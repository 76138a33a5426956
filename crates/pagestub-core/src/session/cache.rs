//! Run-scoped value cache shared between sessions.

use crate::error::{Error, Result};
use crate::types::cookie::Cookie;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Cache key of the cookie set injected into every newly built context.
pub const COOKIES_CACHE_KEY: &str = "cookies";

/// Values kept for the lifetime of a test run.
#[derive(Debug, Default)]
pub struct RunCache {
    values: RwLock<HashMap<String, Value>>,
}

impl RunCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.values.write().insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.write().remove(key)
    }

    /// Store the cookie set for future contexts.
    pub fn store_cookies(&self, cookies: &[Cookie]) -> Result<()> {
        let value = serde_json::to_value(cookies).map_err(Error::StoredCookies)?;
        self.set(COOKIES_CACHE_KEY, value);
        Ok(())
    }

    /// Stored cookie set, if any.
    pub fn stored_cookies(&self) -> Result<Option<Vec<Cookie>>> {
        match self.get(COOKIES_CACHE_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(Error::StoredCookies),
        }
    }
}
