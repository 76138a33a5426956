//! Browser transport abstraction.
//!
//! The engine that actually drives a browser (launch, CDP or Playwright wire protocol) is
//! supplied by the host. Pages expose explicit registration calls for route, request and
//! console handlers; the transport invokes them synchronously, in event order, for each page.

use crate::error::TransportError;
use crate::mocks::classifier::RouteDecision;
use crate::types::context::ContextOptions;
use crate::types::cookie::Cookie;
use crate::types::request::InterceptedRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Route handler: decides what happens to a request matching its URL pattern.
pub type RouteHandler = Arc<dyn Fn(&InterceptedRequest) -> RouteDecision + Send + Sync>;

/// Observer called for every request the page issues.
pub type RequestObserver = Arc<dyn Fn(&InterceptedRequest) + Send + Sync>;

/// Listener called for every console message of the page.
pub type ConsoleListener = Arc<dyn Fn(&ConsoleMessage) + Send + Sync>;

/// Console message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleKind {
    Log,
    Debug,
    Info,
    Warning,
    Error,
}

/// Message written to the page console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    pub kind: ConsoleKind,
    pub text: String,
}

impl ConsoleMessage {
    pub fn new(kind: ConsoleKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Running browser.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Create an isolated browser context.
    async fn new_context(
        &self,
        options: &ContextOptions,
    ) -> TransportResult<Arc<dyn BrowserContext>>;

    /// Whether the browser process is still reachable.
    fn is_connected(&self) -> bool;
}

/// Isolated browser session owning cookies, storage and pages.
#[async_trait]
pub trait BrowserContext: Send + Sync {
    async fn new_page(&self) -> TransportResult<Arc<dyn Page>>;

    async fn add_cookies(&self, cookies: &[Cookie]) -> TransportResult<()>;

    async fn cookies(&self) -> TransportResult<Vec<Cookie>>;
}

/// Single browser tab.
#[async_trait]
pub trait Page: Send + Sync {
    /// Current page URL
    fn url(&self) -> String;

    /// Navigate; `timeout` overrides the default navigation timeout for this call.
    async fn goto(&self, url: &str, timeout: Option<Duration>) -> TransportResult<()>;

    /// Navigate one step back in history.
    async fn go_back(&self) -> TransportResult<()>;

    /// Wait on the page's own clock.
    async fn wait_for_timeout(&self, duration: Duration) -> TransportResult<()>;

    /// Evaluate a script in the page and return its JSON result.
    async fn evaluate(&self, script: &str) -> TransportResult<Value>;

    /// Timeout for element waits and other actions
    fn set_default_timeout(&self, timeout: Duration);

    /// Timeout for navigations
    fn set_default_navigation_timeout(&self, timeout: Duration);

    /// Route every request whose URL matches the glob `pattern` through `handler`.
    async fn route(&self, pattern: &str, handler: RouteHandler) -> TransportResult<()>;

    fn on_request(&self, observer: RequestObserver);

    fn on_console(&self, listener: ConsoleListener);
}
