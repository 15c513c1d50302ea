use dioxus::prelude::ServerFnError;
use server::workflow::ShipmentBackend;
use shared_types::{
    AppError, PendingFile, SaveShipmentPayload, ShipmentTypeOption, StatusTransition,
    StockMovement,
};

/// Workflow backend that goes through the server functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerFnBackend;

fn app_error(err: ServerFnError) -> AppError {
    AppError::from_server_error_or_internal(&err.to_string())
}

impl ShipmentBackend for ServerFnBackend {
    async fn shipment_types(&self) -> Result<Vec<ShipmentTypeOption>, AppError> {
        server::api::list_shipment_types().await.map_err(app_error)
    }

    async fn send_step(&self, stock_movement_id: &str) -> Result<StockMovement, AppError> {
        server::api::get_send_step(stock_movement_id.to_string())
            .await
            .map_err(app_error)
    }

    async fn save_shipment(
        &self,
        stock_movement_id: &str,
        payload: SaveShipmentPayload,
    ) -> Result<(), AppError> {
        server::api::save_shipment(stock_movement_id.to_string(), payload)
            .await
            .map_err(app_error)
    }

    async fn upload_document(
        &self,
        stock_movement_id: &str,
        file: PendingFile,
    ) -> Result<(), AppError> {
        server::api::upload_shipment_document(stock_movement_id.to_string(), file)
            .await
            .map_err(app_error)
    }

    async fn transition_status(
        &self,
        stock_movement_id: &str,
        transition: StatusTransition,
    ) -> Result<(), AppError> {
        server::api::transition_shipment_status(stock_movement_id.to_string(), transition)
            .await
            .map_err(app_error)
    }
}
