//! Page steps over a core [`Session`].

use crate::dsl::{params_to_map, parse_seconds};
use crate::error::{Result, StepError};
use pagestub_core::session::transport::Browser;
use pagestub_core::types::capture::CapturedRequest;
use pagestub_core::types::cookie::Cookie;
use pagestub_core::{CaptureLog, Session, SessionManager};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Parameter naming the navigation target.
pub const URL_KEY: &str = "urlKey";

/// Parameter overriding the navigation timeout, in seconds.
pub const TIMEOUT_KEY: &str = "timeout";

/// Wait used when a sleep step's parameter is not a usable number of seconds.
pub const DEFAULT_SLEEP: Duration = Duration::from_secs(3);

/// Page steps bound to one session.
#[derive(Debug, Clone)]
pub struct WebPage {
    session: Session,
    capture: Arc<CaptureLog>,
}

impl WebPage {
    pub fn new(session: Session, capture: Arc<CaptureLog>) -> Self {
        Self { session, capture }
    }

    /// Create a session through `manager` and wrap it.
    pub async fn open(manager: &SessionManager, browser: &dyn Browser) -> Result<Self> {
        let session = manager.create_session(browser).await?;
        Ok(Self::new(session, Arc::clone(manager.capture_log())))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Navigate to a page name or URL: `"home"` or `"home, timeout=10"`.
    pub async fn navigate(&self, param: &str) -> Result<()> {
        let params = params_to_map(param, URL_KEY);
        let target = params
            .get(URL_KEY)
            .ok_or_else(|| StepError::MissingParameter(URL_KEY.to_string()))?;
        let timeout = params
            .get(TIMEOUT_KEY)
            .map(|value| parse_seconds(TIMEOUT_KEY, value))
            .transpose()?;

        self.session.navigate(target, timeout).await?;
        Ok(())
    }

    pub async fn return_previous_page(&self) -> Result<()> {
        self.session.return_previous_page().await?;
        Ok(())
    }

    /// Wait `param` seconds. A non-numeric, negative or oversized parameter waits [`DEFAULT_SLEEP`].
    pub async fn sleep(&self, param: &str) -> Result<Duration> {
        let duration = match parse_seconds("sleep", param) {
            Ok(duration) => duration,
            Err(err) => {
                warn!(param, error = %err, "invalid sleep parameter, using default wait");
                DEFAULT_SLEEP
            }
        };
        self.session.sleep(duration).await?;
        Ok(duration)
    }

    pub fn cur_page_equals(&self, param: &str) -> Result<bool> {
        Ok(self.session.cur_page_equals(param.trim())?)
    }

    pub async fn add_cookies(&self, name: &str, value: &str, url: &str) -> Result<()> {
        self.session.add_cookies(name, value, url).await?;
        Ok(())
    }

    pub async fn get_cookies(&self) -> Result<Vec<Cookie>> {
        Ok(self.session.get_cookies().await?)
    }

    /// Store the current cookies for the next fresh context. Returns how many were stored.
    pub async fn save_cookies(&self) -> Result<usize> {
        Ok(self.session.save_cookies().await?)
    }

    pub async fn get_local_storage(&self) -> Result<HashMap<String, String>> {
        Ok(self.session.get_local_storage().await?)
    }

    pub async fn get_session_storage(&self) -> Result<HashMap<String, String>> {
        Ok(self.session.get_session_storage().await?)
    }

    /// Latest request captured for `operation`.
    pub fn captured_request(&self, operation: &str) -> Option<CapturedRequest> {
        self.capture.latest(operation.trim())
    }
}
