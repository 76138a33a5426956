//! Step-level bindings for the Pagestub core library.
//!
//! Test runners pass raw step parameters (`"home, timeout=10"`, `"getUser=case42"`). This
//! crate parses them and forwards to the core session and registries.

mod dsl;
mod error;
pub mod logging;
mod mocks;
mod page;

pub use dsl::{params_to_map, parse_seconds};
pub use error::{Result, StepError};
pub use mocks::{bind_mocks, load_mock_cases};
pub use page::{WebPage, DEFAULT_SLEEP, TIMEOUT_KEY, URL_KEY};

/// Library version
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
