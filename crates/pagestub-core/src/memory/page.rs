//! In-memory page that dispatches requests through its registered routes.

use crate::error::TransportError;
use crate::matching::UrlGlob;
use crate::mocks::classifier::RouteDecision;
use crate::session::transport::{
    ConsoleListener, ConsoleMessage, Page, RequestObserver, RouteHandler, TransportResult,
};
use crate::session::{LOCAL_STORAGE_SCRIPT, SESSION_STORAGE_SCRIPT};
use crate::types::request::{InterceptedRequest, ResourceType};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

/// URL of a page that has not navigated yet.
pub const ABOUT_BLANK: &str = "about:blank";

/// Request seen by a page together with the routing outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkEntry {
    pub request: InterceptedRequest,
    pub decision: RouteDecision,
}

#[derive(Default)]
struct PageState {
    url: String,
    history: Vec<String>,
    default_timeout: Option<Duration>,
    navigation_timeout: Option<Duration>,
    routes: Vec<(UrlGlob, RouteHandler)>,
    observers: Vec<RequestObserver>,
    console: Vec<ConsoleListener>,
    local_storage: Map<String, Value>,
    session_storage: Map<String, Value>,
    navigations: Vec<(String, Option<Duration>)>,
    waits: Vec<Duration>,
    network: Vec<NetworkEntry>,
}

/// In-memory page.
///
/// Handlers are invoked outside the state lock, so a handler may call back into the page.
pub struct MemoryPage {
    state: Mutex<PageState>,
}

impl fmt::Debug for MemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MemoryPage")
            .field("url", &state.url)
            .field("routes", &state.routes.len())
            .field("observers", &state.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PageState {
                url: ABOUT_BLANK.to_string(),
                ..PageState::default()
            }),
        }
    }

    /// Feed a request through the page: observers first, then the most recently registered
    /// matching route. Unrouted requests pass through.
    pub fn dispatch(&self, request: InterceptedRequest) -> RouteDecision {
        let (observers, handler) = {
            let state = self.state.lock();
            let handler = state
                .routes
                .iter()
                .rev()
                .find(|(glob, _)| glob.matches(&request.url))
                .map(|(_, handler)| handler.clone());
            (state.observers.clone(), handler)
        };

        for observer in &observers {
            observer(&request);
        }
        let decision = handler.map_or(RouteDecision::Passthrough, |handler| handler(&request));

        self.state.lock().network.push(NetworkEntry {
            request,
            decision: decision.clone(),
        });
        decision
    }

    /// Deliver a console message to every listener.
    pub fn emit_console(&self, message: ConsoleMessage) {
        let listeners = self.state.lock().console.clone();
        for listener in &listeners {
            listener(&message);
        }
    }

    pub fn set_local_storage(&self, key: impl Into<String>, value: impl Into<String>) {
        self.state
            .lock()
            .local_storage
            .insert(key.into(), Value::String(value.into()));
    }

    pub fn set_session_storage(&self, key: impl Into<String>, value: impl Into<String>) {
        self.state
            .lock()
            .session_storage
            .insert(key.into(), Value::String(value.into()));
    }

    pub fn default_timeout(&self) -> Option<Duration> {
        self.state.lock().default_timeout
    }

    pub fn navigation_timeout(&self) -> Option<Duration> {
        self.state.lock().navigation_timeout
    }

    /// Navigations performed, with the per-call timeout override.
    pub fn navigations(&self) -> Vec<(String, Option<Duration>)> {
        self.state.lock().navigations.clone()
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.state.lock().waits.clone()
    }

    pub fn network_log(&self) -> Vec<NetworkEntry> {
        self.state.lock().network.clone()
    }

    /// Route patterns in registration order.
    pub fn route_patterns(&self) -> Vec<String> {
        self.state
            .lock()
            .routes
            .iter()
            .map(|(glob, _)| glob.as_str().to_string())
            .collect()
    }

    pub fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }

    pub fn console_listener_count(&self) -> usize {
        self.state.lock().console.len()
    }
}

#[async_trait]
impl Page for MemoryPage {
    fn url(&self) -> String {
        self.state.lock().url.clone()
    }

    /// The document request is routed like any other; an aborted one fails the navigation.
    async fn goto(&self, url: &str, timeout: Option<Duration>) -> TransportResult<()> {
        let decision = self.dispatch(InterceptedRequest::get(url, ResourceType::Document));
        if decision.is_abort() {
            return Err(TransportError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_FAILED".to_string(),
            });
        }

        let mut state = self.state.lock();
        let previous = std::mem::replace(&mut state.url, url.to_string());
        state.history.push(previous);
        state.navigations.push((url.to_string(), timeout));
        Ok(())
    }

    /// No-op when there is no history entry.
    async fn go_back(&self) -> TransportResult<()> {
        let mut state = self.state.lock();
        if let Some(previous) = state.history.pop() {
            state.url = previous;
        }
        Ok(())
    }

    /// Recorded, not slept.
    async fn wait_for_timeout(&self, duration: Duration) -> TransportResult<()> {
        self.state.lock().waits.push(duration);
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> TransportResult<Value> {
        let state = self.state.lock();
        match script {
            LOCAL_STORAGE_SCRIPT => Ok(Value::Object(state.local_storage.clone())),
            SESSION_STORAGE_SCRIPT => Ok(Value::Object(state.session_storage.clone())),
            other => Err(TransportError::Protocol(format!(
                "script not supported in memory: {other}"
            ))),
        }
    }

    fn set_default_timeout(&self, timeout: Duration) {
        self.state.lock().default_timeout = Some(timeout);
    }

    fn set_default_navigation_timeout(&self, timeout: Duration) {
        self.state.lock().navigation_timeout = Some(timeout);
    }

    async fn route(&self, pattern: &str, handler: RouteHandler) -> TransportResult<()> {
        let glob = UrlGlob::new(pattern).map_err(|err| {
            TransportError::Protocol(format!("invalid route pattern '{pattern}': {err}"))
        })?;
        self.state.lock().routes.push((glob, handler));
        Ok(())
    }

    fn on_request(&self, observer: RequestObserver) {
        self.state.lock().observers.push(observer);
    }

    fn on_console(&self, listener: ConsoleListener) {
        self.state.lock().console.push(listener);
    }
}
