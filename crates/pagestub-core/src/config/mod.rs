//! Run configuration: document parsing, lookup sources and typed settings.

pub mod error;
pub mod parser;
mod settings;
mod source;

pub use settings::{context_options, FrameSettings};
pub use source::{ConfigSource, StaticConfig};
