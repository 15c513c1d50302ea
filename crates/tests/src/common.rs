use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use server::openboxes::OpenBoxesClient;
use shared_types::BackendConfig;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const MOVEMENT_ID: &str = "sm-1";
pub const ORIGIN_ID: &str = "loc-origin";

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// `"POST /api/stockMovements/sm-1"`, for asserting call order.
    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<HashMap<(String, String), (StatusCode, Value)>>>,
    one_shot: Arc<Mutex<HashMap<(String, String), VecDeque<(StatusCode, Value)>>>>,
}

/// In-process stand-in for the OpenBoxes REST API.
///
/// Every request is recorded. Responses are looked up by method and path:
/// one-shot responses first, in the order they were queued, then the
/// standing response. Anything not registered answers `200 {"data": null}`.
pub struct MockBackend {
    pub base_url: String,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock backend stopped");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.state
            .responses
            .lock()
            .expect("responses lock")
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    /// Answer the next matching request with `status`, then fall back to
    /// whatever was registered before.
    pub fn respond_once(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.state
            .one_shot
            .lock()
            .expect("one-shot lock")
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.requests().iter().map(Recorded::line).collect()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Client without credentials: no login round-trip.
    pub fn client(&self) -> OpenBoxesClient {
        OpenBoxesClient::new(BackendConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
            ..BackendConfig::default()
        })
        .expect("Failed to build client")
    }

    pub fn client_with_login(&self) -> OpenBoxesClient {
        OpenBoxesClient::new(BackendConfig {
            base_url: self.base_url.clone(),
            username: Some("manager".to_string()),
            password: Some("secret".to_string()),
            location_id: Some(ORIGIN_ID.to_string()),
            timeout_secs: 5,
        })
        .expect("Failed to build client")
    }

    /// Register the step-6 projection for [`MOVEMENT_ID`].
    pub fn serve_movement(&self, movement: Value) {
        self.respond(
            Method::GET,
            &format!("/api/stockMovements/{MOVEMENT_ID}"),
            StatusCode::OK,
            json!({ "data": movement }),
        );
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().expect("requests lock").push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type,
        body: body.to_vec(),
    });

    let key = (method.to_string(), uri.path().to_string());
    let queued = state
        .one_shot
        .lock()
        .expect("one-shot lock")
        .get_mut(&key)
        .and_then(VecDeque::pop_front);
    let canned = queued.or_else(|| {
        state
            .responses
            .lock()
            .expect("responses lock")
            .get(&key)
            .cloned()
    });
    match canned {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => (StatusCode::OK, Json(json!({ "data": null }))).into_response(),
    }
}

/// Step-6 projection of a packed, not yet issued shipment leaving
/// [`ORIGIN_ID`].
pub fn packed_movement() -> Value {
    json!({
        "id": MOVEMENT_ID,
        "name": "SM-1 Main Depot to Clinic",
        "description": "Monthly replenishment",
        "origin": {
            "id": ORIGIN_ID,
            "name": "Main Depot",
            "locationType": { "locationTypeCode": "DEPOT", "description": "Depot" }
        },
        "destination": {
            "id": "loc-clinic",
            "name": "Clinic",
            "locationType": { "locationTypeCode": "WARD", "description": "Ward" }
        },
        "stocklist": null,
        "requestedBy": { "id": "u-1", "name": "Jane Requester" },
        "dateRequested": "01/10/2026",
        "dateShipped": "01/15/2026 09:30 +00:00",
        "shipmentType": { "id": "st-air", "name": "Air" },
        "trackingNumber": "TRK-9",
        "driverName": null,
        "comments": null,
        "statusCode": "PACKED",
        "shipmentStatus": null,
        "lineItems": [],
        "packPage": {
            "packPageItems": [
                {
                    "palletName": "Pallet 1",
                    "boxName": "Box A",
                    "productCode": "P-100",
                    "productName": "Gauze",
                    "quantityShipped": 12,
                    "binLocationName": "A-01"
                }
            ]
        },
        "associations": {
            "documents": [
                { "name": "Packing list", "uri": "/stockMovement/print/sm-1", "stepNumber": 5, "hidden": false },
                { "name": "Export", "uri": "/stockMovement/export/sm-1", "stepNumber": 5, "hidden": true },
                { "name": "Picklist", "uri": "/stockMovement/picklist/sm-1", "stepNumber": 4, "hidden": false }
            ]
        }
    })
}
