//! Mock registry, capture log and request routing.
//!
//! This module provides the interception engine:
//! - [`MockRegistry`]: operation → mock case bindings and mock case bodies
//! - [`CaptureLog`]: latest observed request per mock-bound operation
//! - [`RouteClassifier`]: decides abort / mock / passthrough for a request
//! - [`Interceptor`]: the classifier and capture hook wired as page handlers
//!
//! [`MockRegistry`]: registry::MockRegistry
//! [`CaptureLog`]: capture::CaptureLog
//! [`RouteClassifier`]: classifier::RouteClassifier
//! [`Interceptor`]: interceptor::Interceptor

pub mod capture;
pub mod classifier;
pub mod interceptor;
pub mod registry;
