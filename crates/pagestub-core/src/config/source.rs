//! Configuration lookup sources.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Read access to run configuration.
///
/// `frame` values tune the plugin itself (timeouts, interception), `web_info` values
/// describe the emulated browser, and page schema URLs map logical page names to addresses.
pub trait ConfigSource: Send + Sync {
    /// Resolve a logical page name to its URL.
    fn page_schema_url(&self, key: &str) -> Option<String>;

    /// Raw frame configuration value.
    fn frame_value(&self, key: &str) -> Option<Value>;

    /// Raw web-info configuration value.
    fn web_info_value(&self, key: &str) -> Option<Value>;
}

/// In-memory configuration, usually parsed from a run config document.
///
/// ```yaml
/// frame:
///   wait_ele_timeout: 10
///   abort_domain_list: [ads.example.com]
/// web_info:
///   locale: zh-CN
/// pages:
///   home: https://www.example.com/home
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticConfig {
    #[serde(default)]
    pub frame: Map<String, Value>,
    #[serde(default)]
    pub web_info: Map<String, Value>,
    #[serde(default)]
    pub pages: HashMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.frame.insert(key.into(), value.into());
        self
    }

    pub fn with_web_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.web_info.insert(key.into(), value.into());
        self
    }

    pub fn with_page(mut self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.pages.insert(key.into(), url.into());
        self
    }
}

impl ConfigSource for StaticConfig {
    fn page_schema_url(&self, key: &str) -> Option<String> {
        self.pages.get(key).cloned()
    }

    fn frame_value(&self, key: &str) -> Option<Value> {
        self.frame.get(key).cloned()
    }

    fn web_info_value(&self, key: &str) -> Option<Value> {
        self.web_info.get(key).cloned()
    }
}
