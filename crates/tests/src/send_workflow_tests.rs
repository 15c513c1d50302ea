use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use server::workflow::{self, LeaveIntent, LeaveOutcome, SubmitError};
use shared_types::{
    AppErrorKind, PendingFile, PendingFiles, ShipmentFormValues, STATUS_ISSUED,
    WRONG_LOCATION_MESSAGE,
};

use crate::common::*;

async fn loaded_values(mock: &MockBackend) -> ShipmentFormValues {
    let client = mock.client();
    workflow::load_send_step(&client, &ShipmentFormValues::new(MOVEMENT_ID))
        .await
        .expect("load step")
        .values
}

#[tokio::test]
async fn load_folds_movement_into_form() {
    let mock = MockBackend::start().await;
    mock.serve_movement(packed_movement());
    let client = mock.client();

    let loaded = workflow::load_send_step(&client, &ShipmentFormValues::new(MOVEMENT_ID))
        .await
        .expect("load step");

    assert_eq!(loaded.values.shipment_type.as_deref(), Some("st-air"));
    assert_eq!(
        loaded.values.destination.as_ref().map(|d| d.label.as_str()),
        Some("Clinic [Ward]")
    );
    assert!(!loaded.step.supplier);
    assert_eq!(loaded.step.table_items.len(), 1);
    let visible: Vec<_> = loaded
        .step
        .visible_documents()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(visible, vec!["Packing list"]);
}

#[tokio::test]
async fn shipment_types_are_offered_by_display_label() {
    let mock = MockBackend::start().await;
    mock.respond(
        Method::GET,
        "/api/generic/shipmentType",
        StatusCode::OK,
        json!({ "data": [{ "id": "st-air", "name": "Air|fr:Avion" }] }),
    );
    let client = mock.client();

    let options = workflow::load_shipment_types(&client).await.expect("types");

    assert_eq!(options[0].value, "st-air");
    assert_eq!(options[0].label, "Air");
}

#[tokio::test]
async fn save_before_issue_posts_header_without_refetch() {
    let mock = MockBackend::start().await;
    mock.serve_movement(packed_movement());
    let values = loaded_values(&mock).await;
    let client = mock.client();

    let outcome = workflow::save(&client, &values).await.expect("save");

    assert!(!outcome.refetch);
    let posts: Vec<_> = mock
        .requests_to(&format!("/api/stockMovements/{MOVEMENT_ID}"))
        .into_iter()
        .filter(|r| r.method == "POST")
        .collect();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].json()["shipmentType.id"], "st-air");
    assert_eq!(posts[0].json()["trackingNumber"], "TRK-9");
    assert_eq!(posts[0].json()["driverName"], "");
}

#[tokio::test]
async fn save_after_issue_changes_destination_and_refetches() {
    let mock = MockBackend::start().await;
    let mut movement = packed_movement();
    movement["statusCode"] = json!(STATUS_ISSUED);
    mock.serve_movement(movement);
    let values = loaded_values(&mock).await;
    let client = mock.client();

    let outcome = workflow::save(&client, &values).await.expect("save");

    assert!(outcome.refetch);
    let post = mock
        .requests_to(&format!("/api/stockMovements/{MOVEMENT_ID}"))
        .into_iter()
        .find(|r| r.method == "POST")
        .expect("save request");
    assert_eq!(
        post.json(),
        json!({
            "destination.id": "loc-clinic",
            "name": "SM-1 Main Depot to Clinic",
            "shipmentType.id": "st-air"
        })
    );
}

#[tokio::test]
async fn submit_from_wrong_location_sends_nothing() {
    let mock = MockBackend::start().await;
    mock.serve_movement(packed_movement());
    let values = loaded_values(&mock).await;
    let before = mock.requests().len();
    let client = mock.client();
    let mut files = PendingFiles::new();
    files.drop_files(vec![PendingFile::new("a.pdf", "application/pdf", vec![1])]);
    let mut spawned = Vec::new();

    let err = workflow::submit(&client, Some("loc-elsewhere"), &values, &files, |f| {
        spawned.push(f)
    })
    .await
    .unwrap_err();

    match err {
        SubmitError::WrongLocation(e) => assert_eq!(e.message, WRONG_LOCATION_MESSAGE),
        other => panic!("expected wrong location, got {other:?}"),
    }
    assert!(spawned.is_empty());
    assert_eq!(mock.requests().len(), before);
}

#[tokio::test]
async fn submit_from_supplier_origin_skips_location_check() {
    let mock = MockBackend::start().await;
    let mut movement = packed_movement();
    movement["origin"] = json!({ "id": "sup-1", "name": "Vendor", "type": "SUPPLIER" });
    mock.serve_movement(movement);
    let values = loaded_values(&mock).await;
    let client = mock.client();

    workflow::submit(&client, Some(ORIGIN_ID), &values, &PendingFiles::new(), |_| {})
        .await
        .expect("submit");

    assert!(mock
        .lines()
        .contains(&format!("POST /api/stockMovements/{MOVEMENT_ID}/status")));
}

#[tokio::test]
async fn submit_saves_header_then_issues() {
    let mock = MockBackend::start().await;
    mock.serve_movement(packed_movement());
    let values = loaded_values(&mock).await;
    let before = mock.requests().len();
    let client = mock.client();
    let mut files = PendingFiles::new();
    files.drop_files(vec![PendingFile::new(
        "waybill.pdf",
        "application/pdf",
        b"pdf".to_vec(),
    )]);
    let mut spawned = Vec::new();

    workflow::submit(&client, Some(ORIGIN_ID), &values, &files, |f| {
        spawned.push(f)
    })
    .await
    .expect("submit");

    assert_eq!(
        mock.lines()[before..].to_vec(),
        vec![
            format!("POST /api/stockMovements/{MOVEMENT_ID}"),
            format!("POST /api/stockMovements/{MOVEMENT_ID}/status"),
        ]
    );
    assert_eq!(spawned.len(), 1);

    let notice = workflow::upload(&client, MOVEMENT_ID, spawned.remove(0)).await;
    assert!(notice.is_success());
    assert_eq!(
        mock.requests_to(&format!("/stockMovement/uploadDocument/{MOVEMENT_ID}"))
            .len(),
        1
    );
}

#[tokio::test]
async fn submit_stops_when_save_is_rejected() {
    let mock = MockBackend::start().await;
    mock.serve_movement(packed_movement());
    let values = loaded_values(&mock).await;
    mock.respond(
        Method::POST,
        &format!("/api/stockMovements/{MOVEMENT_ID}"),
        StatusCode::BAD_REQUEST,
        json!({ "errorMessage": "invalid" }),
    );
    let client = mock.client();

    let err = workflow::submit(&client, Some(ORIGIN_ID), &values, &PendingFiles::new(), |_| {})
        .await
        .unwrap_err();

    match err {
        SubmitError::Backend(e) => assert_eq!(e.kind, AppErrorKind::BadRequest),
        other => panic!("expected backend error, got {other:?}"),
    }
    assert!(mock
        .requests_to(&format!("/api/stockMovements/{MOVEMENT_ID}/status"))
        .is_empty());
}

#[tokio::test]
async fn failed_upload_reports_error_notice() {
    let mock = MockBackend::start().await;
    mock.respond(
        Method::POST,
        &format!("/stockMovement/uploadDocument/{MOVEMENT_ID}"),
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({}),
    );
    let client = mock.client();

    let notice = workflow::upload(
        &client,
        MOVEMENT_ID,
        PendingFile::new("scan.png", "image/png", vec![0x89]),
    )
    .await;

    assert!(!notice.is_success());
    assert_eq!(notice.message(), "Error occured during file upload!");
}

#[tokio::test]
async fn leaving_with_invalid_form_asks_without_saving() {
    let mock = MockBackend::start().await;
    let client = mock.client();
    let values = ShipmentFormValues::new(MOVEMENT_ID);

    let outcome = workflow::leave(&client, &values, LeaveIntent::Exit)
        .await
        .expect("leave");

    match outcome {
        LeaveOutcome::Confirm(prompt) => assert_eq!(prompt.proceed_label, "Yes"),
        other => panic!("expected confirmation, got {other:?}"),
    }
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn leaving_with_valid_form_saves_first() {
    let mock = MockBackend::start().await;
    mock.serve_movement(packed_movement());
    let values = loaded_values(&mock).await;
    let client = mock.client();

    let outcome = workflow::leave(&client, &values, LeaveIntent::Previous)
        .await
        .expect("leave");

    assert_eq!(outcome, LeaveOutcome::Proceed);
    assert_eq!(
        mock.lines().last().cloned(),
        Some(format!("POST /api/stockMovements/{MOVEMENT_ID}"))
    );
}
