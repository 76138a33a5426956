//! Step-level flow: load and bind mocks, open a page, issue requests, inspect captures.

use pagestub_core::config::StaticConfig;
use pagestub_core::memory::MemoryBrowser;
use pagestub_core::types::request::{InterceptedRequest, PostData, ResourceType};
use pagestub_core::{RouteDecision, SessionManager};
use pagestub_steps::{bind_mocks, load_mock_cases, StepError, WebPage};
use std::sync::Arc;

#[tokio::test]
async fn mocked_operation_is_served_and_captured() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("user.yaml"),
        "user_ok:\n  id: 1\n  name: Ada\n",
    )
    .unwrap();

    let manager = SessionManager::new(Arc::new(
        StaticConfig::new()
            .with_page("home", "https://www.example.com/home")
            .with_frame("abort_domain_list", "ads.example.com"),
    ));
    let pattern = format!("{}/*.yaml", dir.path().display());
    assert_eq!(load_mock_cases(manager.registry(), &pattern).await.unwrap(), 1);
    assert_eq!(bind_mocks(manager.registry(), "getUser=user_ok").unwrap(), 1);

    let browser = MemoryBrowser::new();
    let web_page = WebPage::open(&manager, &browser).await.unwrap();
    web_page.navigate("home").await.unwrap();
    let page = browser
        .last_context()
        .and_then(|context| context.last_page())
        .expect("a page was opened");

    let decision = page.dispatch(InterceptedRequest::post(
        "https://api.example.com/v1/getUser",
        ResourceType::Fetch,
        r#"{"uid":1}"#,
    ));
    match decision {
        RouteDecision::Mock(response) => {
            assert_eq!(response.status, 200);
            assert_eq!(
                serde_json::from_str::<serde_json::Value>(&response.body).unwrap(),
                serde_json::json!({"id": 1, "name": "Ada"})
            );
        }
        other => panic!("expected a mocked response, got {other:?}"),
    }

    let captured = web_page.captured_request("getUser").expect("captured");
    assert_eq!(captured.url, "https://api.example.com/v1/getUser");
    assert_eq!(
        captured.post_data,
        Some(PostData::Text(r#"{"uid":1}"#.to_string()))
    );
    assert!(web_page.captured_request("getOrders").is_none());
}

#[tokio::test]
async fn blocked_navigation_surfaces_core_error() {
    let manager = SessionManager::new(Arc::new(
        StaticConfig::new().with_frame("abort_domain_list", "ads.example.com"),
    ));
    let browser = MemoryBrowser::new();
    let web_page = WebPage::open(&manager, &browser).await.unwrap();

    let err = web_page
        .navigate("https://ads.example.com/landing")
        .await
        .unwrap_err();
    assert!(matches!(err, StepError::Core(pagestub_core::Error::Transport(_))));
}

#[tokio::test]
async fn saved_cookies_seed_the_next_context() {
    let manager = SessionManager::new(Arc::new(StaticConfig::new()));
    let browser = MemoryBrowser::new();

    let first = WebPage::open(&manager, &browser).await.unwrap();
    first
        .add_cookies("sid", "abc", "https://www.example.com")
        .await
        .unwrap();
    first.save_cookies().await.unwrap();

    manager.set_browser_exited(true);
    let second = WebPage::open(&manager, &browser).await.unwrap();
    assert!(!second.session().shares_context(first.session()));

    let cookies = second.get_cookies().await.unwrap();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].value, "abc");
}
