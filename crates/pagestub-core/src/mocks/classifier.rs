//! Route classification for intercepted requests.
//!
//! This module provides `RouteClassifier`, which decides for each request whether it is
//! aborted, answered from a mock case or sent to the network unchanged.

use crate::matching::{hostname, operation_key, DomainBlocklist};
use crate::mocks::registry::MockRegistry;
use crate::types::mock::MockResponse;
use crate::types::request::InterceptedRequest;
use std::sync::Arc;

/// Action to take for an intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Fail the request without sending it
    Abort,
    /// Fulfill the request with a mock response
    Mock(MockResponse),
    /// Send the request to the network unchanged
    Passthrough,
}

impl RouteDecision {
    pub fn is_abort(&self) -> bool {
        matches!(self, RouteDecision::Abort)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RouteDecision::Abort => "abort",
            RouteDecision::Mock(_) => "mock",
            RouteDecision::Passthrough => "passthrough",
        }
    }
}

/// Decides abort / mock / passthrough from the registry and the blocklist.
///
/// Classification has no side effects: the same request against the same registry state
/// always yields the same decision.
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    registry: Arc<MockRegistry>,
    blocklist: Arc<DomainBlocklist>,
}

impl RouteClassifier {
    pub fn new(registry: Arc<MockRegistry>, blocklist: Arc<DomainBlocklist>) -> Self {
        Self {
            registry,
            blocklist,
        }
    }

    pub fn registry(&self) -> &MockRegistry {
        &self.registry
    }

    /// Whether the request URL points at a blocklisted host.
    pub fn is_blocked(&self, url: &str) -> bool {
        if self.blocklist.is_empty() {
            return false;
        }
        hostname(url).is_some_and(|host| self.blocklist.blocks(&host))
    }

    /// Classify a request.
    ///
    /// Checks run in order: blocklist, resource type, operation binding, case body.
    /// The first check that fails decides.
    pub fn classify(&self, request: &InterceptedRequest) -> RouteDecision {
        if self.is_blocked(&request.url) {
            return RouteDecision::Abort;
        }

        if !request.resource_type.is_mockable() {
            return RouteDecision::Passthrough;
        }

        let operation = operation_key(&request.url);
        match self.registry.resolve(&operation) {
            Some(body) => RouteDecision::Mock(MockResponse::json(body.to_body_text())),
            None => RouteDecision::Passthrough,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::request::ResourceType;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn classifier(blocked: &[&str]) -> RouteClassifier {
        let registry = MockRegistry::new();
        registry.bind("getUser", "case42");
        registry.add_case("case42", json!({"id": 1}));
        registry.bind("getRaw", "raw");
        registry.add_case("raw", "{\"raw\": true}");
        registry.bind("getMissing", "nobody");
        RouteClassifier::new(
            Arc::new(registry),
            Arc::new(blocked.iter().collect()),
        )
    }

    #[rstest]
    #[case(ResourceType::Xhr)]
    #[case(ResourceType::Fetch)]
    #[case(ResourceType::Document)]
    #[case(ResourceType::Image)]
    fn test_blocklisted_host_aborts_regardless_of_type(#[case] resource_type: ResourceType) {
        let classifier = classifier(&["ads.example.com"]);
        let request = InterceptedRequest::get("https://ads.example.com/track", resource_type);
        assert_eq!(classifier.classify(&request), RouteDecision::Abort);
    }

    #[rstest]
    fn test_blocklisted_host_aborts_even_when_bound() {
        let classifier = classifier(&["api.example.com"]);
        let request = InterceptedRequest::get("https://api.example.com/getUser", ResourceType::Xhr);
        assert_eq!(classifier.classify(&request), RouteDecision::Abort);
    }

    #[rstest]
    #[case(ResourceType::Document)]
    #[case(ResourceType::Script)]
    #[case(ResourceType::Image)]
    #[case(ResourceType::WebSocket)]
    #[case(ResourceType::Other)]
    fn test_non_mockable_type_passes_through(#[case] resource_type: ResourceType) {
        let classifier = classifier(&[]);
        let request = InterceptedRequest::get("https://api.example.com/getUser", resource_type);
        assert_eq!(classifier.classify(&request), RouteDecision::Passthrough);
    }

    #[rstest]
    #[case(ResourceType::Xhr)]
    #[case(ResourceType::Fetch)]
    fn test_bound_operation_is_mocked(#[case] resource_type: ResourceType) {
        let classifier = classifier(&["ads.example.com"]);
        let request = InterceptedRequest::get(
            "https://api.example.com/v1/getUser?id=9",
            resource_type,
        );

        let RouteDecision::Mock(response) = classifier.classify(&request) else {
            panic!("expected a mock decision");
        };
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, "application/json;charset=utf-8");
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, json!({"id": 1}));
    }

    #[rstest]
    fn test_string_body_is_served_verbatim() {
        let classifier = classifier(&[]);
        let request = InterceptedRequest::get("https://api.example.com/getRaw", ResourceType::Fetch);
        assert_eq!(
            classifier.classify(&request),
            RouteDecision::Mock(MockResponse::json("{\"raw\": true}"))
        );
    }

    #[rstest]
    #[case("https://api.example.com/getOrders")]
    #[case("https://api.example.com/getMissing")]
    #[case("https://api.example.com/getUser/")]
    fn test_unresolved_operation_passes_through(#[case] url: &str) {
        let classifier = classifier(&[]);
        let request = InterceptedRequest::get(url, ResourceType::Xhr);
        assert_eq!(classifier.classify(&request), RouteDecision::Passthrough);
    }

    #[rstest]
    fn test_unparseable_url_is_not_blocked() {
        let classifier = classifier(&["ads.example.com"]);
        assert!(!classifier.is_blocked("not a url"));
        assert!(classifier.is_blocked("https://ads.example.com/pixel.gif"));
    }

    #[rstest]
    fn test_classification_is_repeatable() {
        let classifier = classifier(&[]);
        let request = InterceptedRequest::get("https://api.example.com/getUser", ResourceType::Xhr);
        assert_eq!(classifier.classify(&request), classifier.classify(&request));
    }
}
