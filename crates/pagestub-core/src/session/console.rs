//! Page console forwarding.

use crate::session::transport::{ConsoleKind, ConsoleListener, ConsoleMessage};
use std::sync::Arc;
use tracing::{error, warn};

/// Forwards page console warnings and errors to the log. Other levels are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleBridge;

impl ConsoleBridge {
    /// Log `message` if it is a warning or an error. Returns whether it was forwarded.
    pub fn forward(message: &ConsoleMessage) -> bool {
        match message.kind {
            ConsoleKind::Warning => {
                warn!(target: "pagestub::console", "{}", message.text);
                true
            }
            ConsoleKind::Error => {
                error!(target: "pagestub::console", "{}", message.text);
                true
            }
            ConsoleKind::Log | ConsoleKind::Debug | ConsoleKind::Info => false,
        }
    }

    pub fn listener() -> ConsoleListener {
        Arc::new(|message: &ConsoleMessage| {
            Self::forward(message);
        })
    }
}
