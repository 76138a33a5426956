//! Page operations exposed to test steps.

use crate::config::ConfigSource;
use crate::error::{Error, Result, TransportError};
use crate::matching::strip_query;
use crate::session::cache::RunCache;
use crate::session::hooks::CustomOperation;
use crate::session::transport::{BrowserContext, Page};
use crate::types::cookie::Cookie;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Script returning the page's `localStorage` as a plain object.
pub const LOCAL_STORAGE_SCRIPT: &str = "() => Object.assign({}, window.localStorage)";

/// Script returning the page's `sessionStorage` as a plain object.
pub const SESSION_STORAGE_SCRIPT: &str = "() => Object.assign({}, window.sessionStorage)";

/// One page of a browser context, with its interception already wired.
///
/// Created by [`SessionManager::create_session`](crate::session::manager::SessionManager::create_session).
#[derive(Clone)]
pub struct Session {
    context: Arc<dyn BrowserContext>,
    page: Arc<dyn Page>,
    config: Arc<dyn ConfigSource>,
    hooks: Arc<dyn CustomOperation>,
    cache: Arc<RunCache>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("url", &self.page.url())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub(crate) fn new(
        context: Arc<dyn BrowserContext>,
        page: Arc<dyn Page>,
        config: Arc<dyn ConfigSource>,
        hooks: Arc<dyn CustomOperation>,
        cache: Arc<RunCache>,
    ) -> Self {
        Self {
            context,
            page,
            config,
            hooks,
            cache,
        }
    }

    pub fn page(&self) -> &Arc<dyn Page> {
        &self.page
    }

    pub fn context(&self) -> &Arc<dyn BrowserContext> {
        &self.context
    }

    /// Whether both sessions run in the same browser context.
    pub fn shares_context(&self, other: &Session) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.context), Arc::as_ptr(&other.context))
    }

    /// Resolve a navigation target.
    ///
    /// The custom page URL hook wins when it yields a URL. Otherwise the target is looked up
    /// in the page schema; an absolute http(s) URL without a schema entry is used directly.
    pub async fn resolve_url(&self, target: &str) -> Result<String> {
        if let Some(url) = self.hooks.page_url(target).await.map_err(Error::Hook)? {
            return Ok(url);
        }
        if let Some(url) = self.config.page_schema_url(target) {
            return Ok(url);
        }
        match Url::parse(target) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(target.to_string()),
            _ => Err(Error::MissingPageUrl(target.to_string())),
        }
    }

    /// Navigate to a page name or URL. `timeout` applies to this navigation only.
    pub async fn navigate(&self, target: &str, timeout: Option<Duration>) -> Result<()> {
        let url = self.resolve_url(target).await?;
        debug!(target = %target, url = %url, ?timeout, "navigating");
        self.page.goto(&url, timeout).await?;
        Ok(())
    }

    pub async fn return_previous_page(&self) -> Result<()> {
        self.page.go_back().await?;
        Ok(())
    }

    pub async fn sleep(&self, duration: Duration) -> Result<()> {
        self.page.wait_for_timeout(duration).await?;
        Ok(())
    }

    /// Compare the current page with a URL or page name, ignoring query strings.
    pub fn cur_page_equals(&self, target: &str) -> Result<bool> {
        let expected = if target.starts_with("http") {
            target.to_string()
        } else {
            self.config
                .page_schema_url(target)
                .ok_or_else(|| Error::MissingPageUrl(target.to_string()))?
        };
        let current = self.page.url();
        Ok(strip_query(&current) == strip_query(&expected))
    }

    /// Add a single cookie scoped to `url`.
    pub async fn add_cookies(&self, name: &str, value: &str, url: &str) -> Result<()> {
        self.context
            .add_cookies(&[Cookie::for_url(name, value, url)])
            .await?;
        Ok(())
    }

    pub async fn get_cookies(&self) -> Result<Vec<Cookie>> {
        Ok(self.context.cookies().await?)
    }

    /// Store the context's cookies so that the next new context starts with them.
    pub async fn save_cookies(&self) -> Result<usize> {
        let cookies = self.context.cookies().await?;
        self.cache.store_cookies(&cookies)?;
        Ok(cookies.len())
    }

    pub async fn get_local_storage(&self) -> Result<HashMap<String, String>> {
        self.read_storage(LOCAL_STORAGE_SCRIPT).await
    }

    pub async fn get_session_storage(&self) -> Result<HashMap<String, String>> {
        self.read_storage(SESSION_STORAGE_SCRIPT).await
    }

    async fn read_storage(&self, script: &str) -> Result<HashMap<String, String>> {
        match self.page.evaluate(script).await? {
            Value::Object(entries) => Ok(entries
                .into_iter()
                .map(|(key, value)| match value {
                    Value::String(s) => (key, s),
                    other => (key, other.to_string()),
                })
                .collect()),
            Value::Null => Ok(HashMap::new()),
            other => Err(TransportError::Protocol(format!(
                "storage script returned {other}"
            ))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticConfig;
    use crate::error::BoxError;
    use crate::memory::{MemoryBrowser, MemoryPage};
    use crate::session::manager::SessionManager;
    use async_trait::async_trait;
    use rstest::rstest;

    const HOME: &str = "https://www.example.com/home";

    struct PageHook;

    #[async_trait]
    impl CustomOperation for PageHook {
        async fn page_url(&self, param: &str) -> std::result::Result<Option<String>, BoxError> {
            match param {
                "home" => Ok(Some("https://staging.example.com/home".to_string())),
                "broken" => Err("page table unavailable".into()),
                _ => Ok(None),
            }
        }
    }

    async fn open(manager: &SessionManager) -> (MemoryBrowser, Session, Arc<MemoryPage>) {
        let browser = MemoryBrowser::new();
        let session = manager.create_session(&browser).await.unwrap();
        let page = browser
            .last_context()
            .and_then(|context| context.last_page())
            .expect("a page was opened");
        (browser, session, page)
    }

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(
            StaticConfig::new()
                .with_page("home", HOME)
                .with_frame("abort_domain_list", "ads.example.com"),
        ))
    }

    #[tokio::test]
    async fn test_navigate_by_page_name() {
        let manager = manager();
        let (_browser, session, page) = open(&manager).await;

        session.navigate("home", None).await.unwrap();
        assert_eq!(page.url(), HOME);
        assert_eq!(page.navigations(), vec![(HOME.to_string(), None)]);
    }

    #[tokio::test]
    async fn test_navigate_absolute_url_with_timeout() {
        let manager = manager();
        let (_browser, session, page) = open(&manager).await;
        let timeout = Some(Duration::from_secs(5));

        session
            .navigate("https://www.example.com/about", timeout)
            .await
            .unwrap();
        assert_eq!(
            page.navigations(),
            vec![("https://www.example.com/about".to_string(), timeout)]
        );
    }

    #[rstest]
    #[case("checkout")]
    #[case("ftp://files.example.com/report")]
    #[tokio::test]
    async fn test_navigate_unresolvable_target(#[case] target: &str) {
        let manager = manager();
        let (_browser, session, page) = open(&manager).await;

        let err = session.navigate(target, None).await.unwrap_err();
        assert!(matches!(err, Error::MissingPageUrl(ref name) if name == target));
        assert!(page.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_page_url_hook_takes_precedence() {
        let manager = manager().with_hooks(Arc::new(PageHook));
        let (_browser, session, page) = open(&manager).await;

        session.navigate("home", None).await.unwrap();
        assert_eq!(page.url(), "https://staging.example.com/home");

        let err = session.navigate("broken", None).await.unwrap_err();
        assert_eq!(err.to_string(), "page table unavailable");
        assert!(matches!(err, Error::Hook(_)));
    }

    #[tokio::test]
    async fn test_navigate_to_blocked_host_fails() {
        let manager = manager();
        let (_browser, session, page) = open(&manager).await;

        let err = session
            .navigate("https://ads.example.com/landing", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(TransportError::Navigation { .. })
        ));
        assert_eq!(page.url(), crate::memory::ABOUT_BLANK);
    }

    #[tokio::test]
    async fn test_return_previous_page() {
        let manager = manager();
        let (_browser, session, page) = open(&manager).await;

        session.navigate("home", None).await.unwrap();
        session
            .navigate("https://www.example.com/detail?id=7", None)
            .await
            .unwrap();
        session.return_previous_page().await.unwrap();
        assert_eq!(page.url(), HOME);
    }

    #[tokio::test]
    async fn test_sleep_waits_on_page() {
        let manager = manager();
        let (_browser, session, page) = open(&manager).await;

        session.sleep(Duration::from_millis(1500)).await.unwrap();
        assert_eq!(page.waits(), vec![Duration::from_millis(1500)]);
    }

    #[rstest]
    #[case("https://www.example.com/home?from=banner", true)]
    #[case("https://www.example.com/home", true)]
    #[case("home", true)]
    #[case("https://www.example.com/about", false)]
    #[tokio::test]
    async fn test_cur_page_equals_ignores_query(#[case] target: &str, #[case] expected: bool) {
        let manager = manager();
        let (_browser, session, _page) = open(&manager).await;

        session
            .navigate("https://www.example.com/home?utm=mail", None)
            .await
            .unwrap();
        assert_eq!(session.cur_page_equals(target).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_cur_page_equals_unknown_page_name() {
        let manager = manager();
        let (_browser, session, _page) = open(&manager).await;

        assert!(matches!(
            session.cur_page_equals("checkout").unwrap_err(),
            Error::MissingPageUrl(_)
        ));
    }

    #[tokio::test]
    async fn test_cookies_saved_for_next_context() {
        let manager = manager();
        let (_browser, session, _page) = open(&manager).await;

        session
            .add_cookies("sid", "abc", "https://www.example.com")
            .await
            .unwrap();
        let cookies = session.get_cookies().await.unwrap();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, "sid");

        assert_eq!(session.save_cookies().await.unwrap(), 1);
        assert_eq!(manager.cache().stored_cookies().unwrap(), Some(cookies));
    }

    #[tokio::test]
    async fn test_storage_reads() {
        let manager = manager();
        let (_browser, session, page) = open(&manager).await;
        page.set_local_storage("token", "abc");
        page.set_session_storage("step", "2");

        let local = session.get_local_storage().await.unwrap();
        let session_storage = session.get_session_storage().await.unwrap();
        assert_eq!(local.get("token").map(String::as_str), Some("abc"));
        assert_eq!(session_storage.len(), 1);
        assert_eq!(session_storage["step"], "2");
    }
}
