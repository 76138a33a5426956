//! Interceptor wiring the classifier and capture hook into a page.

use crate::matching::{operation_key, DomainBlocklist};
use crate::mocks::capture::CaptureLog;
use crate::mocks::classifier::{RouteClassifier, RouteDecision};
use crate::mocks::registry::MockRegistry;
use crate::session::transport::{RequestObserver, RouteHandler};
use crate::types::capture::CapturedRequest;
use crate::types::request::InterceptedRequest;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

/// Owns the shared registry, capture log and blocklist used by a page's handlers.
///
/// Cloning is cheap; clones share the same tables.
#[derive(Debug, Clone)]
pub struct Interceptor {
    classifier: RouteClassifier,
    capture: Arc<CaptureLog>,
}

impl Interceptor {
    pub fn new(
        registry: Arc<MockRegistry>,
        capture: Arc<CaptureLog>,
        blocklist: Arc<DomainBlocklist>,
    ) -> Self {
        Self {
            classifier: RouteClassifier::new(registry, blocklist),
            capture,
        }
    }

    pub fn classifier(&self) -> &RouteClassifier {
        &self.classifier
    }

    pub fn capture_log(&self) -> &CaptureLog {
        &self.capture
    }

    /// Route handler entry point.
    pub fn route(&self, request: &InterceptedRequest) -> RouteDecision {
        let decision = self.classifier.classify(request);
        debug!(
            url = %request.url,
            resource_type = %request.resource_type,
            decision = decision.label(),
            "routed request"
        );
        decision
    }

    /// Capture hook entry point.
    ///
    /// Records the request when its host is not blocklisted and its operation has a mock
    /// binding. Returns whether an entry was written.
    pub fn observe(&self, request: &InterceptedRequest) -> bool {
        if self.classifier.is_blocked(&request.url) {
            return false;
        }

        let operation = operation_key(&request.url);
        if !self.classifier.registry().is_bound(&operation) {
            return false;
        }

        let captured = CapturedRequest {
            post_data: request.post_data.clone(),
            url: request.url.clone(),
            update_timestamp: Utc::now().timestamp_millis(),
        };
        debug!(operation = %operation, url = %request.url, "captured request");
        self.capture.record(operation, captured);
        true
    }

    /// [`Interceptor::route`] as a page route handler.
    pub fn route_handler(&self) -> RouteHandler {
        let interceptor = self.clone();
        Arc::new(move |request: &InterceptedRequest| interceptor.route(request))
    }

    /// [`Interceptor::observe`] as a page request observer.
    pub fn request_observer(&self) -> RequestObserver {
        let interceptor = self.clone();
        Arc::new(move |request: &InterceptedRequest| {
            interceptor.observe(request);
        })
    }
}
