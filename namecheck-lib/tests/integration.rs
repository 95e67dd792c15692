// namecheck-lib/tests/integration.rs

//! Integration tests for namecheck-lib against a stub backend.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use namecheck_lib::{
    ApiClient, ClientConfig, DomainView, LookupBackend, NameCheckError, Session, Tab,
    UsernameView,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Seen = Arc<Mutex<Vec<(String, Value)>>>;

async fn check(State(seen): State<Seen>, Json(body): Json<Value>) -> Response {
    seen.lock().unwrap().push(("/check".to_string(), body.clone()));
    let username = body["username"].as_str().unwrap_or_default();

    if username == "boom" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response();
    }

    Json(json!({
        "username": username,
        "all_available": false,
        "results": [
            { "platform": "github", "available": false, "url": format!("https://github.com/{}", username) },
            { "platform": "tiktok", "available": false, "url": format!("https://www.tiktok.com/@{}", username), "error": "rate limited" }
        ],
        "suggestions": [format!("{}_", username), format!("the_{}", username)]
    }))
    .into_response()
}

async fn check_domain(State(seen): State<Seen>, Json(body): Json<Value>) -> Response {
    seen.lock()
        .unwrap()
        .push(("/check-domain".to_string(), body.clone()));
    let domain = body["domain_name"].as_str().unwrap_or_default();

    match domain {
        "example.com" => Json(json!({
            "domain_name": "example.com",
            "domain_exists": true,
            "registrar": "RESERVED-Internet Assigned Numbers Authority",
            "creation_date": "1995-08-14T04:00:00Z",
            "expiration_date": "2026-08-13T04:00:00Z",
            "name_servers": ["A.IANA-SERVERS.NET", "B.IANA-SERVERS.NET"],
            "raw_data": { "status": ["clientDeleteProhibited"] }
        }))
        .into_response(),
        "broken.test" => Json(json!({
            "domain_name": "broken.test",
            "domain_exists": false,
            "name_servers": [],
            "error": "WHOIS server unreachable"
        }))
        .into_response(),
        "garbled.test" => (StatusCode::OK, "<html>not json</html>").into_response(),
        other => Json(json!({
            "domain_name": other,
            "domain_exists": false,
            "name_servers": []
        }))
        .into_response(),
    }
}

async fn platforms() -> Json<Value> {
    Json(json!({ "platforms": ["twitter", "instagram", "github"] }))
}

/// Serve the stub backend on an ephemeral port.
async fn spawn_backend() -> (ApiClient, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/check", post(check))
        .route("/check-domain", post(check_domain))
        .route("/platforms", get(platforms))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ClientConfig::default()
        .with_base_url(format!("http://{}/", addr))
        .with_timeout(Duration::from_secs(5));
    (ApiClient::with_config(config).unwrap(), seen)
}

#[tokio::test]
async fn test_username_scenario() {
    let (client, seen) = spawn_backend().await;
    let mut session = Session::new(Tab::Username);
    session.set_input("testuser123");

    assert_eq!(session.search(&client).await, Some(true));

    {
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "/check");
        assert_eq!(seen[0].1, json!({ "username": "testuser123" }));
    }

    let view = UsernameView::from(session.username_form().result().unwrap());
    assert_eq!(view.summary_label(), "0 / 1 Available");
    assert_eq!(view.cards[0].platform, "github");
    assert_eq!(view.cards[0].status.label(), "✕ Taken");
    assert!(view.cards[1].link.is_none());
    let captions: Vec<String> = view.suggestions.iter().map(|s| s.caption()).collect();
    assert_eq!(captions, vec!["@testuser123_", "@the_testuser123"]);
}

#[tokio::test]
async fn test_short_inputs_never_reach_backend() {
    let (client, seen) = spawn_backend().await;

    let mut session = Session::new(Tab::Username);
    session.set_input("a");
    assert_eq!(session.search(&client).await, None);

    session.switch_tab(Tab::Domain);
    session.set_input("ex");
    assert_eq!(session.search(&client).await, None);

    assert!(seen.lock().unwrap().is_empty());
    assert!(session.error().is_none());
}

#[tokio::test]
async fn test_registered_domain_scenario() {
    let (client, seen) = spawn_backend().await;
    let mut session = Session::new(Tab::Domain);
    session.set_input(" example.com ");

    assert_eq!(session.search(&client).await, Some(true));
    assert_eq!(
        seen.lock().unwrap()[0].1,
        json!({ "domain_name": "example.com" })
    );

    let view = DomainView::from(session.domain_form().result().unwrap());
    assert_eq!(view.badge(), "Registered");
    let DomainView::Registered(details) = view else {
        panic!("expected a registered domain");
    };
    assert_eq!(details.created, "August 14, 1995");
    assert_eq!(details.expires, "August 13, 2026");
    assert_eq!(details.name_server_summary, "2 servers");
    assert_eq!(
        details.name_servers,
        vec!["a.iana-servers.net", "b.iana-servers.net"]
    );
}

#[tokio::test]
async fn test_available_and_backend_error_domains() {
    let (client, _) = spawn_backend().await;

    let free = client.check_domain("unclaimed-name.dev").await.unwrap();
    assert!(matches!(
        DomainView::from(&free),
        DomainView::Available { .. }
    ));

    let broken = client.check_domain("broken.test").await.unwrap();
    match DomainView::from(&broken) {
        DomainView::Error {
            domain_name,
            message,
        } => {
            assert_eq!(domain_name, "broken.test");
            assert_eq!(message, "WHOIS server unreachable");
        }
        other => panic!("unexpected view: {:?}", other),
    }
}

#[tokio::test]
async fn test_http_500_surfaces_status() {
    let (client, _) = spawn_backend().await;

    let err = client.check_username("boom").await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));

    let mut session = Session::new(Tab::Username);
    session.set_input("boom");
    session.search(&client).await;
    assert_eq!(session.error(), Some("HTTP error! status: 500"));
    assert!(session.username_form().result().is_none());
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (client, _) = spawn_backend().await;
    let err = client.check_domain("garbled.test").await.unwrap_err();
    match err {
        NameCheckError::ParseError { content, .. } => {
            assert_eq!(content.as_deref(), Some("<html>not json</html>"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_resubmit_issues_equivalent_request() {
    let (client, seen) = spawn_backend().await;
    let mut session = Session::new(Tab::Username);
    session.set_input("testuser123");

    session.search(&client).await;
    let first = session.username_form().result().cloned();
    session.search(&client).await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
    assert_eq!(session.username_form().result().cloned(), first);
    assert_eq!(session.username_form().generation(), 2);
}

#[tokio::test]
async fn test_list_platforms() {
    let (client, _) = spawn_backend().await;
    let platforms = client.list_platforms().await.unwrap();
    assert_eq!(platforms, vec!["twitter", "instagram", "github"]);
}
