use dioxus::prelude::*;
use shared_types::{
    Destination, PendingFile, SaveShipmentPayload, SessionContext, ShipmentTypeOption,
    StatusTransition, StockMovement,
};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use crate::workflow::ShipmentBackend;

#[cfg(feature = "server")]
fn backend() -> Result<&'static crate::openboxes::OpenBoxesClient, ServerFnError> {
    crate::openboxes::client().map_err(|e| e.into_server_fn_error())
}

// ── Session ────────────────────────────────────────────

/// Current warehouse location and backend URL for this deployment.
#[server]
pub async fn get_session_context() -> Result<SessionContext, ServerFnError> {
    let config = crate::config::backend_config();
    Ok(SessionContext {
        current_location_id: config.location_id.clone(),
        backend_url: config.trimmed_base_url().to_string(),
    })
}

// ── Reference data ─────────────────────────────────────

#[server]
pub async fn list_shipment_types() -> Result<Vec<ShipmentTypeOption>, ServerFnError> {
    backend()?
        .shipment_types()
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Location search for the destination select. Short queries return
/// nothing without calling the backend.
#[server]
pub async fn search_locations(name: String) -> Result<Vec<Destination>, ServerFnError> {
    let query = name.trim();
    if query.chars().count() < shared_types::LOCATION_SEARCH_MIN_CHARS {
        return Ok(Vec::new());
    }
    let locations = backend()?
        .search_locations(query)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    Ok(locations.iter().map(Destination::from_location).collect())
}

// ── Stock movement ─────────────────────────────────────

#[server]
pub async fn get_send_step(stock_movement_id: String) -> Result<StockMovement, ServerFnError> {
    backend()?
        .send_step(&stock_movement_id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn save_shipment(
    stock_movement_id: String,
    payload: SaveShipmentPayload,
) -> Result<(), ServerFnError> {
    backend()?
        .save_shipment(&stock_movement_id, &payload)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn upload_shipment_document(
    stock_movement_id: String,
    file: PendingFile,
) -> Result<(), ServerFnError> {
    backend()?
        .upload_document(&stock_movement_id, &file)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn transition_shipment_status(
    stock_movement_id: String,
    transition: StatusTransition,
) -> Result<(), ServerFnError> {
    backend()?
        .transition_status(&stock_movement_id, &transition)
        .await
        .map_err(|e| e.into_server_fn_error())
}
