//! Browser sessions: context reuse, page wiring and page operations.
//!
//! - [`SessionManager`]: builds or reuses the browser context and wires interception into
//!   every new page
//! - [`Session`]: one page of a context plus the page operations exposed to test steps
//!
//! [`SessionManager`]: manager::SessionManager

pub mod cache;
pub mod console;
pub mod hooks;
pub mod manager;
mod operations;
pub mod transport;

pub use operations::{Session, LOCAL_STORAGE_SCRIPT, SESSION_STORAGE_SCRIPT};
