//! In-process browser transport.
//!
//! Implements the transport traits without a real browser: pages keep their URL, history and
//! storage in memory, and requests are fed in with [`MemoryPage::dispatch`] so that route
//! handlers and observers run exactly as a real engine would call them. Used by the test
//! suites and by hosts that want to dry-run step files.

mod browser;
mod page;

pub use browser::{MemoryBrowser, MemoryContext};
pub use page::{MemoryPage, NetworkEntry, ABOUT_BLANK};
