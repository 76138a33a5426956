//! Core domain types shared by the interception engine and the transport layer.

pub mod capture;
pub mod context;
pub mod cookie;
pub mod mock;
pub mod request;
