#![allow(clippy::unwrap_used)]
// Integration tests for `PanelClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use tsw_api::models::{DeviceInfo, DisplayUpdate, SystemVersion};
use tsw_api::{Credentials, Error, PanelClient, ResponseShape, Session};

// ── Helpers ─────────────────────────────────────────────────────────

const TRACKING: &str = "TRACKID=t-001; Path=/";

async fn setup() -> (MockServer, PanelClient, Session) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let session = Session::new(&base_url);
    let client = PanelClient::with_client(reqwest::Client::new(), base_url);
    (server, client, session)
}

fn credentials() -> Credentials {
    Credentials::new("admin", SecretString::from("secret".to_owned()))
}

fn header_is(
    name: &'static str,
    expected: &'static str,
) -> impl Fn(&Request) -> bool + Send + Sync + 'static {
    move |req: &Request| {
        req.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected)
    }
}

/// Mount the three handshake endpoints, each expected exactly once.
async fn mount_handshake(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/userlogin.html"))
        .respond_with(ResponseTemplate::new(200).append_header("Set-Cookie", TRACKING))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/userlogin.html"))
        .and(header_is("cookie", TRACKING))
        .and(body_string_contains("login=admin"))
        .and(body_string_contains("passwd=secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("Set-Cookie", "userstr=abc")
                .append_header("Set-Cookie", "AuthByPasswd=crypt:xyz")
                .append_header("CREST-XSRF-TOKEN", "tok-123"),
        )
        .expect(1)
        .mount(server)
        .await;
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_authenticate_two_step_handshake() {
    let (server, client, mut session) = setup().await;
    mount_handshake(&server).await;

    client
        .authenticate(&mut session, &credentials())
        .await
        .unwrap();

    assert_eq!(session.tracking_id(), Some(TRACKING));
    assert_eq!(
        session.session_cookie(),
        Some("userstr=abc,AuthByPasswd=crypt:xyz")
    );
    assert_eq!(session.csrf_token(), Some("tok-123"));
}

#[tokio::test]
async fn test_authenticate_is_idempotent() {
    let (server, client, mut session) = setup().await;
    mount_handshake(&server).await;

    client
        .authenticate(&mut session, &credentials())
        .await
        .unwrap();
    client
        .authenticate(&mut session, &credentials())
        .await
        .unwrap();
    // Mock expectations (one request each) are verified when `server` drops.
}

#[tokio::test]
async fn test_login_post_carries_origin_and_referer() {
    let (server, client, mut session) = setup().await;
    let origin = server.uri();
    let referer = format!("{origin}/userlogin.html");

    Mock::given(method("GET"))
        .and(path("/userlogin.html"))
        .respond_with(ResponseTemplate::new(200).append_header("Set-Cookie", TRACKING))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let expected_origin = origin.clone();
    let expected_referer = referer.clone();
    Mock::given(method("POST"))
        .and(path("/userlogin.html"))
        .and(move |req: &Request| {
            let header = |name: &str| {
                req.headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
            };
            header("origin").as_deref() == Some(expected_origin.as_str())
                && header("referer").as_deref() == Some(expected_referer.as_str())
        })
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("Set-Cookie", "AuthByPasswd=1")
                .append_header("CREST-XSRF-TOKEN", "t"),
        )
        .expect(1)
        .mount(&server)
        .await;

    client
        .authenticate(&mut session, &credentials())
        .await
        .unwrap();
    assert_eq!(session.origin(), origin);
    assert_eq!(session.login_referer(), referer);
}

#[tokio::test]
async fn test_blank_credentials_fail_without_io() {
    let (server, client, mut session) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let blank = Credentials::new("", SecretString::from("secret".to_owned()));
    let result = client.authenticate(&mut session, &blank).await;

    assert!(
        matches!(result, Err(Error::MissingCredentials)),
        "expected MissingCredentials, got: {result:?}"
    );
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_rejected() {
    let (server, client, mut session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/userlogin.html"))
        .respond_with(ResponseTemplate::new(200).append_header("Set-Cookie", TRACKING))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/userlogin.html"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&server)
        .await;

    let result = client.authenticate(&mut session, &credentials()).await;

    match result {
        Err(Error::Authentication { message }) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
    assert!(!session.is_authenticated());
    assert_eq!(session.tracking_id(), Some(TRACKING));
}

#[tokio::test]
async fn test_login_without_session_cookie_is_rejected() {
    let (server, client, mut session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/userlogin.html"))
        .respond_with(ResponseTemplate::new(200).append_header("Set-Cookie", TRACKING))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/userlogin.html"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = client.authenticate(&mut session, &credentials()).await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

#[tokio::test]
async fn test_logout_failure_is_ignored() {
    let (server, client, mut session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/userlogin.html"))
        .respond_with(ResponseTemplate::new(200).append_header("Set-Cookie", TRACKING))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/userlogin.html"))
        .respond_with(ResponseTemplate::new(200).append_header("Set-Cookie", "AuthByPasswd=1"))
        .mount(&server)
        .await;

    client
        .authenticate(&mut session, &credentials())
        .await
        .unwrap();
    assert!(session.is_authenticated());
    // Missing anti-forgery header is tolerated as an empty token.
    assert_eq!(session.csrf_token(), Some(""));
}

#[tokio::test]
async fn test_unreachable_panel() {
    // Port 1 on loopback refuses connections.
    let base_url = Url::parse("http://127.0.0.1:1").unwrap();
    let mut session = Session::new(&base_url);
    let client = PanelClient::with_client(reqwest::Client::new(), base_url);

    let result = client.authenticate(&mut session, &credentials()).await;
    let err = result.unwrap_err();
    assert!(err.is_unreachable(), "expected transport error, got: {err:?}");
}

// ── Resource tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_sends_session_cookie() {
    let (server, client, mut session) = setup().await;
    mount_handshake(&server).await;

    Mock::given(method("GET"))
        .and(path("/Device/DeviceInfo"))
        .and(header_is("cookie", "userstr=abc,AuthByPasswd=crypt:xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Device": {
                "DeviceInfo": {
                    "BuildDate": "Feb 1 2024",
                    "DeviceVersion": "3.002.1061",
                    "ModelId": "0x7A90",
                    "Name": "TSW-1070",
                    "PufVersion": "3.002.1061.001",
                    "SerialNumber": "2146JBH04578"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .authenticate(&mut session, &credentials())
        .await
        .unwrap();
    let info: DeviceInfo = client
        .fetch(&session, ResponseShape::DeviceInfo)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(info.model_id.as_deref(), Some("0x7A90"));
    assert_eq!(info.serial_number.as_deref(), Some("2146JBH04578"));
}

#[tokio::test]
async fn test_fetch_collection() {
    let (server, client, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Device/SystemVersions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Device": {
                "SystemVersions": {
                    "Components": [
                        { "Category": "OS", "Name": "Android OS", "Version": "9" },
                        { "Category": "App", "Name": "UI", "Version": "2.1" }
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let versions: Vec<SystemVersion> = client
        .fetch(&session, ResponseShape::SystemVersions)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].name.as_deref(), Some("Android OS"));
}

#[tokio::test]
async fn test_fetch_server_error() {
    let (server, client, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Device/Display"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let result = client
        .fetch::<serde_json::Value>(&session, ResponseShape::Display)
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!err.is_auth() && !err.is_unreachable());
}

#[tokio::test]
async fn test_fetch_session_expired() {
    let (server, client, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Device/NetworkAdapters"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let result = client
        .fetch::<serde_json::Value>(&session, ResponseShape::NetworkAdapters)
        .await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_post_carries_cookie_and_csrf_token() {
    let (server, client, mut session) = setup().await;
    mount_handshake(&server).await;

    Mock::given(method("POST"))
        .and(path("/Device/Display"))
        .and(header_is("cookie", "userstr=abc,AuthByPasswd=crypt:xyz"))
        .and(header_is("x-crest-xsrf-token", "tok-123"))
        .and(body_string_contains(r#"{"Device":{"Display":{"CurrentState":"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Actions": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .authenticate(&mut session, &credentials())
        .await
        .unwrap();

    let update = DisplayUpdate::from(tsw_api::models::DeviceDisplay {
        current_state: Some("Standby".into()),
        ..Default::default()
    });
    client
        .post_json(&session, "/Device/Display", &update)
        .await
        .unwrap();
}
