#![allow(clippy::unwrap_used)]
// Integration tests for `DashboardClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lowport_api::{DashboardClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DashboardClient) {
    let server = MockServer::start().await;
    let key = SecretString::from("test-key".to_string());
    let client =
        DashboardClient::from_api_key(&server.uri(), &key, &TransportConfig::default()).unwrap();
    (server, client)
}

fn inventory() -> serde_json::Value {
    json!([
        { "serial": "Q2AA-0000-0001", "name": "ap-lobby", "model": "MR46", "networkId": "N_1" },
        { "serial": "Q2BB-0000-0002", "name": "core-sw", "model": "MS390-24", "networkId": "N_1" },
        { "serial": "Q2CC-0000-0003", "name": "mx-edge", "model": "MX68", "networkId": "N_1" },
        { "serial": "Q2DD-0000-0004", "name": "idf-sw", "model": "MS120-8", "networkId": "N_2" }
    ])
}

// ── Device inventory ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_sends_auth_headers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123456/devices"))
        .and(header("X-Cisco-Meraki-API-Key", "test-key"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(inventory()))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client.list_devices("123456").await.unwrap();

    assert_eq!(devices.len(), 4);
    assert_eq!(devices[0].model.as_deref(), Some("MR46"));
}

#[tokio::test]
async fn test_list_switches_keeps_ms_models_in_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123456/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(inventory()))
        .mount(&server)
        .await;

    let switches = client.list_switches("123456").await.unwrap();

    let serials: Vec<&str> = switches.iter().map(|d| d.serial.as_str()).collect();
    assert_eq!(serials, ["Q2BB-0000-0002", "Q2DD-0000-0004"]);
    assert_eq!(switches[1].network_id.as_deref(), Some("N_2"));
}

#[tokio::test]
async fn test_list_switches_without_switches_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123456/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serial": "Q2AA-0000-0001", "model": "MR46" },
            { "serial": "Q2EE-0000-0005" }
        ])))
        .mount(&server)
        .await;

    assert!(client.list_switches("123456").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_devices_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123456/devices"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "errors": ["Invalid API key"] })),
        )
        .mount(&server)
        .await;

    let result = client.list_devices("123456").await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_list_devices_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123456/devices"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    match client.list_devices("123456").await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_devices_invalid_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123456/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    match client.list_devices("123456").await {
        Err(Error::Deserialization { body, .. }) => assert!(body.contains("maintenance")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_base_url_is_invalid() {
    let key = SecretString::from(String::new());
    let client = DashboardClient::from_api_key("", &key, &TransportConfig::default()).unwrap();

    let result = client.list_devices("").await;

    assert!(
        matches!(result, Err(Error::InvalidUrl(_))),
        "expected InvalidUrl error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_base_url_path_is_preserved() {
    let server = MockServer::start().await;
    let key = SecretString::from("test-key".to_string());
    let base = format!("{}/api/v1/", server.uri());
    let client = DashboardClient::from_api_key(&base, &key, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/42/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.list_devices("42").await.unwrap().is_empty());
}

// ── Port statuses ───────────────────────────────────────────────────

#[tokio::test]
async fn test_port_statuses_requests_thirty_days() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "portId": "1",
            "status": "Connected",
            "usageInKb": { "total": 100, "sent": 60, "recv": 40 },
            "speed": "1 Gbps"
        },
        { "portId": "2", "status": "Disconnected", "usageInKb": null }
    ]);

    Mock::given(method("GET"))
        .and(path("/devices/Q2BB-0000-0002/switch/ports/statuses"))
        .and(query_param("timespan", "2592000"))
        .and(header("X-Cisco-Meraki-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let ports = client.get_port_statuses("Q2BB-0000-0002").await.unwrap();

    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].port_id.as_deref(), Some("1"));
    assert_eq!(ports[0].status.as_deref(), Some("Connected"));
    let usage = ports[0].usage().unwrap();
    assert_eq!(usage.total, Some(json!(100)));
    assert_eq!(usage.recv, Some(json!(40)));
    assert_eq!(ports[0].extra.get("speed"), Some(&json!("1 Gbps")));
    assert_eq!(ports[1].usage_in_kb, Some(None));
}

#[tokio::test]
async fn test_port_statuses_non_200_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/devices/Q2BB-0000-0002/switch/ports/statuses"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": ["Not found"] })))
        .mount(&server)
        .await;

    let ports = client.get_port_statuses("Q2BB-0000-0002").await.unwrap();

    assert!(ports.is_empty());
}

#[tokio::test]
async fn test_port_statuses_non_ok_success_is_empty() {
    let (server, client) = setup().await;

    // Only 200 counts; other 2xx codes take the fallback path too.
    Mock::given(method("GET"))
        .and(path("/devices/Q2BB-0000-0002/switch/ports/statuses"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!([{ "portId": "1" }])))
        .mount(&server)
        .await;

    assert!(
        client
            .get_port_statuses("Q2BB-0000-0002")
            .await
            .unwrap()
            .is_empty()
    );
}
