//! Session manager for browser contexts and page wiring.
//!
//! This module provides `SessionManager`, which keeps the reusable browser context and
//! creates pages with request interception, console forwarding and timeouts applied.

use crate::config::{context_options, ConfigSource, FrameSettings};
use crate::error::{Error, Result};
use crate::mocks::capture::CaptureLog;
use crate::mocks::interceptor::Interceptor;
use crate::mocks::registry::MockRegistry;
use crate::session::cache::RunCache;
use crate::session::console::ConsoleBridge;
use crate::session::hooks::{CustomOperation, NoCustomOperation};
use crate::session::operations::Session;
use crate::session::transport::{Browser, BrowserContext};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// URL pattern the interception route handler is registered for.
pub const ROUTE_ALL: &str = "**";

/// Manager for creating sessions and reusing the browser context.
///
/// `SessionManager` owns:
/// - the shared mock registry, capture log and run cache
/// - the reusable browser context (replaced when the browser exits or reuse is disabled)
/// - the project hooks and configuration every session is built from
pub struct SessionManager {
    config: Arc<dyn ConfigSource>,
    hooks: Arc<dyn CustomOperation>,
    registry: Arc<MockRegistry>,
    capture: Arc<CaptureLog>,
    cache: Arc<RunCache>,
    /// Context reused by the next session
    context: Mutex<Option<Arc<dyn BrowserContext>>>,
    browser_exited: AtomicBool,
}

impl SessionManager {
    /// Create a manager with empty registries and no project hooks.
    pub fn new(config: Arc<dyn ConfigSource>) -> Self {
        Self {
            config,
            hooks: Arc::new(NoCustomOperation),
            registry: Arc::new(MockRegistry::new()),
            capture: Arc::new(CaptureLog::new()),
            cache: Arc::new(RunCache::new()),
            context: Mutex::new(None),
            browser_exited: AtomicBool::new(false),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn CustomOperation>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_registry(mut self, registry: Arc<MockRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_capture_log(mut self, capture: Arc<CaptureLog>) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_cache(mut self, cache: Arc<RunCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &Arc<dyn ConfigSource> {
        &self.config
    }

    pub fn registry(&self) -> &Arc<MockRegistry> {
        &self.registry
    }

    pub fn capture_log(&self) -> &Arc<CaptureLog> {
        &self.capture
    }

    pub fn cache(&self) -> &Arc<RunCache> {
        &self.cache
    }

    /// Signal that the browser exited; the next session builds a new context.
    pub fn set_browser_exited(&self, exited: bool) {
        self.browser_exited.store(exited, Ordering::SeqCst);
    }

    pub fn browser_exited(&self) -> bool {
        self.browser_exited.load(Ordering::SeqCst)
    }

    /// Create a session: reuse or build the context, then open and wire a fresh page.
    ///
    /// # Errors
    /// Returns error if:
    /// - frame or web-info configuration holds malformed values
    /// - the custom context hook fails
    /// - the browser transport fails
    pub async fn create_session(&self, browser: &dyn Browser) -> Result<Session> {
        let settings = FrameSettings::from_source(self.config.as_ref())?;
        let context = self.acquire_context(browser, &settings).await?;

        let page = context.new_page().await?;
        if settings.request_interception {
            let interceptor = Interceptor::new(
                Arc::clone(&self.registry),
                Arc::clone(&self.capture),
                Arc::new(settings.blocklist.clone()),
            );
            page.route(ROUTE_ALL, interceptor.route_handler()).await?;
            page.on_request(interceptor.request_observer());
        }
        page.on_console(ConsoleBridge::listener());

        page.set_default_timeout(settings.element_timeout);
        page.set_default_navigation_timeout(settings.navigation_timeout);

        Ok(Session::new(
            context,
            page,
            Arc::clone(&self.config),
            Arc::clone(&self.hooks),
            Arc::clone(&self.cache),
        ))
    }

    /// Reuse the stored context when allowed, otherwise build and store a new one.
    async fn acquire_context(
        &self,
        browser: &dyn Browser,
        settings: &FrameSettings,
    ) -> Result<Arc<dyn BrowserContext>> {
        let mut slot = self.context.lock().await;

        let reusable = !self.browser_exited()
            && !settings.disable_context_reuse
            && browser.is_connected();
        if let Some(context) = slot.as_ref().filter(|_| reusable) {
            info!("reusing browser context");
            return Ok(Arc::clone(context));
        }

        let context = self.build_context(browser).await?;
        *slot = Some(Arc::clone(&context));
        self.set_browser_exited(false);
        Ok(context)
    }

    async fn build_context(&self, browser: &dyn Browser) -> Result<Arc<dyn BrowserContext>> {
        if let Some(context) = self
            .hooks
            .create_browser_context(browser)
            .await
            .map_err(Error::Hook)?
        {
            info!("using custom browser context");
            return Ok(context);
        }

        let options = context_options(self.config.as_ref())?;
        let context = browser.new_context(&options).await?;

        if let Some(cookies) = self.cache.stored_cookies()? {
            if !cookies.is_empty() {
                context.add_cookies(&cookies).await?;
            }
        }

        info!(
            browser_type = %options.browser_type,
            device = options.device.as_deref().unwrap_or("-"),
            "created browser context"
        );
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticConfig;
    use crate::error::{BoxError, TransportError};
    use crate::memory::{MemoryBrowser, MemoryContext, MemoryPage};
    use crate::types::context::ContextOptions;
    use crate::types::cookie::Cookie;
    use async_trait::async_trait;
    use std::time::Duration;

    fn manager(config: StaticConfig) -> SessionManager {
        SessionManager::new(Arc::new(config))
    }

    fn last_page(browser: &MemoryBrowser) -> Arc<MemoryPage> {
        browser
            .last_context()
            .and_then(|context| context.last_page())
            .expect("a page was opened")
    }

    struct FixedContext(Arc<MemoryContext>);

    #[async_trait]
    impl CustomOperation for FixedContext {
        async fn create_browser_context(
            &self,
            _browser: &dyn Browser,
        ) -> std::result::Result<Option<Arc<dyn BrowserContext>>, BoxError> {
            let context: Arc<dyn BrowserContext> = self.0.clone();
            Ok(Some(context))
        }
    }

    struct FailingContext;

    #[async_trait]
    impl CustomOperation for FailingContext {
        async fn create_browser_context(
            &self,
            _browser: &dyn Browser,
        ) -> std::result::Result<Option<Arc<dyn BrowserContext>>, BoxError> {
            Err("login service unavailable".into())
        }
    }

    #[tokio::test]
    async fn test_sessions_share_context_until_browser_exits() {
        let browser = MemoryBrowser::new();
        let manager = manager(StaticConfig::new());

        let first = manager.create_session(&browser).await.unwrap();
        let second = manager.create_session(&browser).await.unwrap();
        assert!(first.shares_context(&second));
        assert_eq!(browser.context_count(), 1);

        manager.set_browser_exited(true);
        let third = manager.create_session(&browser).await.unwrap();
        assert!(!third.shares_context(&first));
        assert_eq!(browser.context_count(), 2);
        assert!(!manager.browser_exited());

        let fourth = manager.create_session(&browser).await.unwrap();
        assert!(fourth.shares_context(&third));
    }

    #[tokio::test]
    async fn test_context_reuse_disabled() {
        let browser = MemoryBrowser::new();
        let manager = manager(StaticConfig::new().with_frame("disable_context_reuse", true));

        let first = manager.create_session(&browser).await.unwrap();
        let second = manager.create_session(&browser).await.unwrap();
        assert!(!first.shares_context(&second));
        assert_eq!(browser.context_count(), 2);
    }

    #[tokio::test]
    async fn test_disconnected_browser_is_not_reused() {
        let browser = MemoryBrowser::new();
        let manager = manager(StaticConfig::new());
        manager.create_session(&browser).await.unwrap();

        browser.disconnect();
        let err = manager.create_session(&browser).await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Closed(_))));
    }

    #[tokio::test]
    async fn test_new_page_wired_for_interception() {
        let browser = MemoryBrowser::new();
        let manager = manager(
            StaticConfig::new()
                .with_frame("wait_ele_timeout", 10)
                .with_frame("page_render_timeout", "45"),
        );
        manager.create_session(&browser).await.unwrap();

        let page = last_page(&browser);
        assert_eq!(page.route_patterns(), vec![ROUTE_ALL]);
        assert_eq!(page.observer_count(), 1);
        assert_eq!(page.console_listener_count(), 1);
        assert_eq!(page.default_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(page.navigation_timeout(), Some(Duration::from_secs(45)));
    }

    #[tokio::test]
    async fn test_interception_disabled_keeps_console_bridge() {
        let browser = MemoryBrowser::new();
        let manager = manager(StaticConfig::new().with_frame("request_interception", false));
        manager.create_session(&browser).await.unwrap();

        let page = last_page(&browser);
        assert!(page.route_patterns().is_empty());
        assert_eq!(page.observer_count(), 0);
        assert_eq!(page.console_listener_count(), 1);
        assert_eq!(page.default_timeout(), Some(Duration::from_secs(30)));
    }

    #[tokio::test]
    async fn test_malformed_timeout_fails_before_context() {
        let browser = MemoryBrowser::new();
        let manager = manager(StaticConfig::new().with_frame("wait_ele_timeout", "soon"));

        let err = manager.create_session(&browser).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref key, .. } if key == "wait_ele_timeout"));
        assert_eq!(browser.context_count(), 0);
    }

    #[tokio::test]
    async fn test_context_built_from_web_info() {
        let browser = MemoryBrowser::new();
        let manager = manager(
            StaticConfig::new()
                .with_web_info("locale", "zh-CN")
                .with_web_info("geolocation", "31.23,121.47"),
        );
        manager.create_session(&browser).await.unwrap();

        let context = browser.last_context().unwrap();
        let options = context.options();
        assert_eq!(options.locale.as_deref(), Some("zh-CN"));
        assert_eq!(options.permissions, vec!["geolocation"]);
        assert_eq!(options.record_video_dir.as_deref(), Some("videos"));
        assert!(options.ignore_https_errors);
    }

    #[tokio::test]
    async fn test_stored_cookies_injected_into_new_context() {
        let browser = MemoryBrowser::new();
        let manager = manager(StaticConfig::new());
        let cookie = Cookie::for_url("sid", "abc", "https://www.example.com");
        manager.cache().store_cookies(&[cookie.clone()]).unwrap();

        let session = manager.create_session(&browser).await.unwrap();
        assert_eq!(session.get_cookies().await.unwrap(), vec![cookie]);
    }

    #[tokio::test]
    async fn test_custom_context_used_as_is() {
        let browser = MemoryBrowser::new();
        let custom = Arc::new(MemoryContext::new(ContextOptions::default()));
        let manager = manager(StaticConfig::new())
            .with_hooks(Arc::new(FixedContext(Arc::clone(&custom))));
        manager
            .cache()
            .store_cookies(&[Cookie::for_url("sid", "abc", "https://www.example.com")])
            .unwrap();

        let session = manager.create_session(&browser).await.unwrap();
        assert_eq!(browser.context_count(), 0);
        assert_eq!(custom.pages().len(), 1);
        assert!(session.get_cookies().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_custom_context_error_passed_through() {
        let browser = MemoryBrowser::new();
        let manager = manager(StaticConfig::new()).with_hooks(Arc::new(FailingContext));

        let err = manager.create_session(&browser).await.unwrap_err();
        assert_eq!(err.to_string(), "login service unavailable");
        let hook_error = err.into_hook_error().expect("hook error");
        assert_eq!(hook_error.to_string(), "login service unavailable");
        assert_eq!(browser.context_count(), 0);
    }
}
