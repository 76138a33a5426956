//! In-memory browser and browser contexts.

use crate::error::TransportError;
use crate::memory::page::MemoryPage;
use crate::session::transport::{Browser, BrowserContext, Page, TransportResult};
use crate::types::context::ContextOptions;
use crate::types::cookie::Cookie;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory browser. Records every context it creates.
#[derive(Debug)]
pub struct MemoryBrowser {
    connected: AtomicBool,
    contexts: Mutex<Vec<Arc<MemoryContext>>>,
}

impl Default for MemoryBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBrowser {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            contexts: Mutex::new(Vec::new()),
        }
    }

    /// Simulate the browser process going away. New contexts fail afterwards.
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    pub fn reconnect(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }

    pub fn contexts(&self) -> Vec<Arc<MemoryContext>> {
        self.contexts.lock().clone()
    }

    pub fn context_count(&self) -> usize {
        self.contexts.lock().len()
    }

    /// Most recently created context.
    pub fn last_context(&self) -> Option<Arc<MemoryContext>> {
        self.contexts.lock().last().cloned()
    }
}

#[async_trait]
impl Browser for MemoryBrowser {
    async fn new_context(
        &self,
        options: &ContextOptions,
    ) -> TransportResult<Arc<dyn BrowserContext>> {
        if !self.is_connected() {
            return Err(TransportError::Closed("browser has been closed".to_string()));
        }
        let context = Arc::new(MemoryContext::new(options.clone()));
        self.contexts.lock().push(Arc::clone(&context));
        Ok(context)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// In-memory browser context.
#[derive(Debug)]
pub struct MemoryContext {
    options: ContextOptions,
    cookies: Mutex<Vec<Cookie>>,
    pages: Mutex<Vec<Arc<MemoryPage>>>,
}

impl MemoryContext {
    pub fn new(options: ContextOptions) -> Self {
        Self {
            options,
            cookies: Mutex::new(Vec::new()),
            pages: Mutex::new(Vec::new()),
        }
    }

    /// Options the context was created with.
    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    pub fn pages(&self) -> Vec<Arc<MemoryPage>> {
        self.pages.lock().clone()
    }

    pub fn last_page(&self) -> Option<Arc<MemoryPage>> {
        self.pages.lock().last().cloned()
    }
}

fn same_cookie(a: &Cookie, b: &Cookie) -> bool {
    a.name == b.name && a.url == b.url && a.domain == b.domain && a.path == b.path
}

#[async_trait]
impl BrowserContext for MemoryContext {
    async fn new_page(&self) -> TransportResult<Arc<dyn Page>> {
        let page = Arc::new(MemoryPage::new());
        self.pages.lock().push(Arc::clone(&page));
        Ok(page)
    }

    /// Cookies replace earlier ones with the same name and scope.
    async fn add_cookies(&self, cookies: &[Cookie]) -> TransportResult<()> {
        if let Some(cookie) = cookies
            .iter()
            .find(|c| c.url.is_none() && (c.domain.is_none() || c.path.is_none()))
        {
            return Err(TransportError::Protocol(format!(
                "cookie '{}' should have a url or a domain/path pair",
                cookie.name
            )));
        }

        let mut jar = self.cookies.lock();
        for cookie in cookies {
            jar.retain(|existing| !same_cookie(existing, cookie));
            jar.push(cookie.clone());
        }
        Ok(())
    }

    async fn cookies(&self) -> TransportResult<Vec<Cookie>> {
        Ok(self.cookies.lock().clone())
    }
}
