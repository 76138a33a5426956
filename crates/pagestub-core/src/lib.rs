//! Request interception and page session management for browser-driven test steps.
//!
//! - [`mocks`]: mock registry, capture log and the abort / mock / passthrough classifier
//! - [`session`]: browser context reuse, page wiring and page operations
//! - [`config`]: run configuration and typed settings
//! - [`memory`]: in-process transport implementing the browser traits
//!
//! The browser engine itself is provided through the traits in [`session::transport`].

pub mod config;
pub mod error;
pub mod matching;
pub mod memory;
pub mod mocks;
pub mod session;
pub mod types;

pub use error::{Error, Result, TransportError};
pub use mocks::capture::CaptureLog;
pub use mocks::classifier::{RouteClassifier, RouteDecision};
pub use mocks::interceptor::Interceptor;
pub use mocks::registry::MockRegistry;
pub use session::manager::SessionManager;
pub use session::Session;
