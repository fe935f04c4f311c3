//! Fetcher behaviour against a local mock of the discussions endpoint

use discussctl_core::{DiscussError, DiscussionClient, SyncConfig, ANNOUNCEMENTS};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, token: Option<&str>) -> SyncConfig {
    SyncConfig {
        api_base: server.uri(),
        repo: "acme/site".to_string(),
        token: token.map(str::to_string),
        ..SyncConfig::default()
    }
}

#[tokio::test]
async fn keeps_only_announcements() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/site/discussions"))
        .and(header("authorization", "token secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"title": "Ship it", "body": "a", "category": {"name": "Announcements"}},
            {"title": "Chat", "body": "b", "category": {"name": "General"}},
            {"title": "Orphan", "body": "c"},
            {"title": "Again", "body": "d", "category": {"name": "Announcements"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = DiscussionClient::new(&config_for(&server, Some("secret")));
    let discussions = client.fetch_category(ANNOUNCEMENTS).await.unwrap();

    let titles: Vec<&str> = discussions.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Ship it", "Again"]);
}

#[tokio::test]
async fn empty_listing_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/site/discussions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = DiscussionClient::new(&config_for(&server, Some("secret")));
    let discussions = client.fetch_category(ANNOUNCEMENTS).await.unwrap();
    assert!(discussions.is_empty());
}

#[tokio::test]
async fn error_status_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/site/discussions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
        .mount(&server)
        .await;

    let client = DiscussionClient::new(&config_for(&server, Some("wrong")));
    let err = client.fetch_category(ANNOUNCEMENTS).await.unwrap_err();

    match err {
        DiscussError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Bad credentials");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_array_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/site/discussions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "nope"})))
        .mount(&server)
        .await;

    let client = DiscussionClient::new(&config_for(&server, None));
    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, DiscussError::Decode { .. }));
}

#[tokio::test]
async fn missing_token_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/site/discussions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = DiscussionClient::new(&config_for(&server, None));
    client.fetch_all().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(requests[0].headers.get("user-agent").is_some());
}

#[tokio::test]
async fn unreachable_host_is_http_error() {
    let server = MockServer::start().await;
    let config = config_for(&server, None);
    drop(server);

    let client = DiscussionClient::new(&config);
    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, DiscussError::Http { .. }));
}
