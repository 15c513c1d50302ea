use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    AppErrorKind, PendingFile, SaveShipmentPayload, ShipmentHeader, StatusTransition,
    SEND_STEP_NUMBER,
};

use crate::common::*;

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn logs_in_once_before_first_call() {
    let mock = MockBackend::start().await;
    mock.serve_movement(packed_movement());
    let client = mock.client_with_login();

    client.list_shipment_types().await.ok();
    client
        .stock_movement(MOVEMENT_ID, SEND_STEP_NUMBER)
        .await
        .expect("step fetch");

    let logins = mock.requests_to("/api/login");
    assert_eq!(logins.len(), 1);
    assert_eq!(
        logins[0].json(),
        json!({ "username": "manager", "password": "secret", "location": ORIGIN_ID })
    );
    assert_eq!(mock.lines()[0], "POST /api/login");
}

#[tokio::test]
async fn expired_session_logs_in_again_and_retries() {
    let mock = MockBackend::start().await;
    mock.serve_movement(packed_movement());
    let client = mock.client_with_login();
    let movement_path = format!("/api/stockMovements/{MOVEMENT_ID}");

    client
        .stock_movement(MOVEMENT_ID, SEND_STEP_NUMBER)
        .await
        .expect("first fetch");
    mock.respond_once(
        Method::GET,
        &movement_path,
        StatusCode::UNAUTHORIZED,
        json!({ "errorMessage": "session expired" }),
    );
    let movement = client
        .stock_movement(MOVEMENT_ID, SEND_STEP_NUMBER)
        .await
        .expect("fetch after expiry");

    assert_eq!(movement.id, MOVEMENT_ID);
    assert_eq!(
        mock.lines(),
        vec![
            "POST /api/login".to_string(),
            format!("GET {movement_path}"),
            format!("GET {movement_path}"),
            "POST /api/login".to_string(),
            format!("GET {movement_path}"),
        ]
    );
}

#[tokio::test]
async fn expired_session_retries_uploads_with_the_whole_file() {
    let mock = MockBackend::start().await;
    let client = mock.client_with_login();
    let upload_path = format!("/stockMovement/uploadDocument/{MOVEMENT_ID}");
    mock.respond_once(Method::POST, &upload_path, StatusCode::UNAUTHORIZED, json!({}));
    let file = PendingFile::new("waybill.pdf", "application/pdf", b"%PDF-1.4 retry".to_vec());

    client
        .upload_document(MOVEMENT_ID, &file)
        .await
        .expect("upload after expiry");

    let uploads = mock.requests_to(&upload_path);
    assert_eq!(uploads.len(), 2);
    assert!(uploads[1].body_text().contains("%PDF-1.4 retry"));
    assert_eq!(mock.requests_to("/api/login").len(), 2);
}

#[tokio::test]
async fn unauthorized_without_credentials_is_not_retried() {
    let mock = MockBackend::start().await;
    let movement_path = format!("/api/stockMovements/{MOVEMENT_ID}");
    mock.respond(
        Method::GET,
        &movement_path,
        StatusCode::UNAUTHORIZED,
        json!({ "errorMessage": "login required" }),
    );
    let client = mock.client();

    let err = client
        .stock_movement(MOVEMENT_ID, SEND_STEP_NUMBER)
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(mock.lines(), vec![format!("GET {movement_path}")]);
}

#[tokio::test]
async fn rejected_retry_surfaces_unauthorized() {
    let mock = MockBackend::start().await;
    let movement_path = format!("/api/stockMovements/{MOVEMENT_ID}");
    mock.respond(
        Method::GET,
        &movement_path,
        StatusCode::UNAUTHORIZED,
        json!({ "errorMessage": "no access" }),
    );
    let client = mock.client_with_login();

    let err = client
        .stock_movement(MOVEMENT_ID, SEND_STEP_NUMBER)
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(mock.requests_to(&movement_path).len(), 2);
    assert_eq!(mock.requests_to("/api/login").len(), 2);
}

#[tokio::test]
async fn skips_login_without_credentials() {
    let mock = MockBackend::start().await;
    let client = mock.client();

    client.search_locations("Cli").await.ok();

    assert!(mock.requests_to("/api/login").is_empty());
}

#[tokio::test]
async fn failed_login_surfaces_unauthorized() {
    let mock = MockBackend::start().await;
    mock.respond(
        Method::POST,
        "/api/login",
        StatusCode::UNAUTHORIZED,
        json!({ "errorMessage": "bad credentials" }),
    );
    let client = mock.client_with_login();

    let err = client
        .stock_movement(MOVEMENT_ID, SEND_STEP_NUMBER)
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert!(mock.requests_to(&format!("/api/stockMovements/{MOVEMENT_ID}")).is_empty());
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn fetches_step_six_projection() {
    let mock = MockBackend::start().await;
    mock.serve_movement(packed_movement());
    let client = mock.client();

    let movement = client
        .stock_movement(MOVEMENT_ID, SEND_STEP_NUMBER)
        .await
        .expect("step fetch");

    assert_eq!(movement.id, MOVEMENT_ID);
    assert_eq!(movement.tracking_number.as_deref(), Some("TRK-9"));
    assert_eq!(movement.driver_name, None);
    let recorded = &mock.requests_to(&format!("/api/stockMovements/{MOVEMENT_ID}"))[0];
    assert_eq!(recorded.query.as_deref(), Some("stepNumber=6"));
}

#[tokio::test]
async fn lists_shipment_types() {
    let mock = MockBackend::start().await;
    mock.respond(
        Method::GET,
        "/api/generic/shipmentType",
        StatusCode::OK,
        json!({ "data": [
            { "id": "st-air", "name": "Air|fr:Avion" },
            { "id": "st-sea", "name": "Sea" }
        ] }),
    );
    let client = mock.client();

    let types = client.list_shipment_types().await.expect("types");

    assert_eq!(types.len(), 2);
    assert_eq!(types[0].name, "Air|fr:Avion");
}

#[tokio::test]
async fn searches_locations_by_name() {
    let mock = MockBackend::start().await;
    mock.respond(
        Method::GET,
        "/api/locations",
        StatusCode::OK,
        json!({ "data": [
            { "id": "loc-clinic", "name": "Clinic", "locationType": { "description": "Ward" } }
        ] }),
    );
    let client = mock.client();

    let found = client.search_locations("Cli nic").await.expect("search");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "loc-clinic");
    let recorded = &mock.requests_to("/api/locations")[0];
    assert_eq!(recorded.query.as_deref(), Some("name=Cli+nic"));
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn save_posts_dotted_keys() {
    let mock = MockBackend::start().await;
    let client = mock.client();
    let payload = SaveShipmentPayload::Header(ShipmentHeader {
        date_shipped: Some("01/15/2026 09:30 +00:00".to_string()),
        shipment_type_id: Some("st-air".to_string()),
        tracking_number: "TRK-9".to_string(),
        driver_name: String::new(),
        comments: String::new(),
    });

    client
        .save_shipment(MOVEMENT_ID, &payload)
        .await
        .expect("save");

    let recorded = &mock.requests_to(&format!("/api/stockMovements/{MOVEMENT_ID}"))[0];
    assert_eq!(recorded.method, "POST");
    assert_eq!(
        recorded.json(),
        json!({
            "dateShipped": "01/15/2026 09:30 +00:00",
            "shipmentType.id": "st-air",
            "trackingNumber": "TRK-9",
            "driverName": "",
            "comments": ""
        })
    );
}

#[tokio::test]
async fn transition_posts_issued_status() {
    let mock = MockBackend::start().await;
    let client = mock.client();

    client
        .transition_status(MOVEMENT_ID, &StatusTransition::issued())
        .await
        .expect("transition");

    let recorded = &mock.requests_to(&format!("/api/stockMovements/{MOVEMENT_ID}/status"))[0];
    assert_eq!(recorded.json(), json!({ "status": "ISSUED" }));
}

#[tokio::test]
async fn upload_sends_multipart_file_contents() {
    let mock = MockBackend::start().await;
    let client = mock.client();
    let file = PendingFile::new("waybill.pdf", "application/pdf", b"%PDF-1.4 test".to_vec());

    client
        .upload_document(MOVEMENT_ID, &file)
        .await
        .expect("upload");

    let recorded = &mock.requests_to(&format!("/stockMovement/uploadDocument/{MOVEMENT_ID}"))[0];
    assert!(recorded
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("multipart/form-data")));
    let body = recorded.body_text();
    assert!(body.contains(r#"name="fileContents""#));
    assert!(body.contains(r#"filename="waybill.pdf""#));
    assert!(body.contains("application/pdf"));
    assert!(body.contains("%PDF-1.4 test"));
}

#[tokio::test]
async fn encodes_movement_id_in_path() {
    let mock = MockBackend::start().await;
    let client = mock.client();

    client.stock_movement("a/b", SEND_STEP_NUMBER).await.ok();

    assert_eq!(mock.requests()[0].path, "/api/stockMovements/a%2Fb");
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_movement_maps_to_not_found() {
    let mock = MockBackend::start().await;
    mock.respond(
        Method::GET,
        &format!("/api/stockMovements/{MOVEMENT_ID}"),
        StatusCode::NOT_FOUND,
        json!({ "errorMessage": "not found" }),
    );
    let client = mock.client();

    let err = client
        .stock_movement(MOVEMENT_ID, SEND_STEP_NUMBER)
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NotFound);
}

#[tokio::test]
async fn server_failure_maps_to_upstream() {
    let mock = MockBackend::start().await;
    mock.respond(
        Method::POST,
        &format!("/api/stockMovements/{MOVEMENT_ID}/status"),
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "errorMessage": "boom" }),
    );
    let client = mock.client();

    let err = client
        .transition_status(MOVEMENT_ID, &StatusTransition::issued())
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Upstream);
}

#[tokio::test]
async fn unreachable_backend_is_an_error() {
    let client = server::openboxes::OpenBoxesClient::new(shared_types::BackendConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..shared_types::BackendConfig::default()
    })
    .expect("client");

    assert!(client.list_shipment_types().await.is_err());
}
