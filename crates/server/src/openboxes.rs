//! HTTP client for the warehouse backend (OpenBoxes REST API).
//!
//! All responses are wrapped as `{"data": ...}`. A session cookie is kept
//! in the client's cookie store; when credentials are configured the client
//! logs in before its first call and again whenever the session expires.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    ApiResponse, AppError, BackendConfig, LocationRef, PendingFile, SaveShipmentPayload,
    ShipmentType, ShipmentTypeOption, StatusTransition, StockMovement, SEND_STEP_NUMBER,
};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error_convert::ReqwestErrorExt;
use crate::workflow::ShipmentBackend;

/// Multipart field the upload endpoint reads the file from.
const UPLOAD_FIELD: &str = "fileContents";

static CLIENT: OnceLock<OpenBoxesClient> = OnceLock::new();

/// Process-wide client built from the loaded configuration.
pub fn client() -> Result<&'static OpenBoxesClient, AppError> {
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }
    let client = OpenBoxesClient::new(crate::config::backend_config().clone())?;
    let _ = CLIENT.set(client);
    CLIENT
        .get()
        .ok_or_else(|| AppError::internal("Backend client unavailable"))
}

pub struct OpenBoxesClient {
    http: Client,
    config: BackendConfig,
    /// Whether the cookie store holds a live backend session.
    logged_in: Mutex<bool>,
}

impl OpenBoxesClient {
    pub fn new(config: BackendConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            config,
            logged_in: Mutex::new(false),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.trimmed_base_url(), path)
    }

    fn movement_path(stock_movement_id: &str) -> String {
        format!(
            "/api/stockMovements/{}",
            urlencoding::encode(stock_movement_id)
        )
    }

    /// Log in unless a session is already open. A no-op without credentials.
    async fn ensure_session(&self) -> Result<(), AppError> {
        if !self.config.has_credentials() {
            return Ok(());
        }
        let mut logged_in = self.logged_in.lock().await;
        if *logged_in {
            return Ok(());
        }
        let body = serde_json::json!({
            "username": self.config.username,
            "password": self.config.password,
            "location": self.config.location_id,
        });
        let response = self
            .http
            .post(self.url("/api/login"))
            .json(&body)
            .send()
            .await
            .map_err(|e| e.into_app_error())?;
        check_status(response, "POST /api/login").await?;
        *logged_in = true;
        tracing::info!(
            username = self.config.username.as_deref().unwrap_or_default(),
            "logged in to warehouse backend"
        );
        Ok(())
    }

    /// Send a request built by `build`. When the backend answers 401 and
    /// credentials are configured, the session is renewed and the request
    /// is sent once more.
    async fn execute(
        &self,
        what: &str,
        build: impl Fn() -> Result<RequestBuilder, AppError>,
    ) -> Result<Response, AppError> {
        self.ensure_session().await?;
        let response = build()?.send().await.map_err(|e| e.into_app_error())?;
        if response.status() != StatusCode::UNAUTHORIZED || !self.config.has_credentials() {
            return check_status(response, what).await;
        }

        tracing::info!(request = what, "backend session expired, logging in again");
        *self.logged_in.lock().await = false;
        self.ensure_session().await?;
        let retry = build()?.send().await.map_err(|e| e.into_app_error())?;
        check_status(retry, what).await
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .execute(&format!("GET {path}"), || {
                Ok(self.http.get(self.url(path)).query(query))
            })
            .await?;
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| e.into_app_error())?;
        Ok(envelope.data)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), AppError> {
        self.execute(&format!("POST {path}"), || {
            Ok(self.http.post(self.url(path)).json(body))
        })
        .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_shipment_types(&self) -> Result<Vec<ShipmentType>, AppError> {
        self.get_data("/api/generic/shipmentType", &[]).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn stock_movement(
        &self,
        stock_movement_id: &str,
        step_number: u32,
    ) -> Result<StockMovement, AppError> {
        self.get_data(
            &Self::movement_path(stock_movement_id),
            &[("stepNumber", step_number.to_string())],
        )
        .await
    }

    #[tracing::instrument(skip(self, payload))]
    pub async fn save_shipment(
        &self,
        stock_movement_id: &str,
        payload: &SaveShipmentPayload,
    ) -> Result<(), AppError> {
        self.post_json(&Self::movement_path(stock_movement_id), &payload.to_body())
            .await
    }

    #[tracing::instrument(skip(self, file), fields(file = %file.name, size = file.size()))]
    pub async fn upload_document(
        &self,
        stock_movement_id: &str,
        file: &PendingFile,
    ) -> Result<(), AppError> {
        let path = format!(
            "/stockMovement/uploadDocument/{}",
            urlencoding::encode(stock_movement_id)
        );
        // Multipart forms are consumed on send, so each attempt builds its own.
        self.execute(&format!("POST {path}"), || {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(&file.content_type)
                .map_err(|e| AppError::bad_request(format!("Invalid content type: {e}")))?;
            Ok(self
                .http
                .post(self.url(&path))
                .multipart(Form::new().part(UPLOAD_FIELD, part)))
        })
        .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn transition_status(
        &self,
        stock_movement_id: &str,
        transition: &StatusTransition,
    ) -> Result<(), AppError> {
        let path = format!("{}/status", Self::movement_path(stock_movement_id));
        self.post_json(&path, transition).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn search_locations(&self, name: &str) -> Result<Vec<LocationRef>, AppError> {
        self.get_data("/api/locations", &[("name", name.to_string())])
            .await
    }
}

/// Turn a non-2xx backend response into an AppError carrying its body.
async fn check_status(response: Response, what: &str) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(request = what, status = status.as_u16(), body = %body, "backend call failed");
    Err(AppError::from_backend_status(
        status.as_u16(),
        format!("{what} returned {status}"),
    ))
}

impl ShipmentBackend for OpenBoxesClient {
    async fn shipment_types(&self) -> Result<Vec<ShipmentTypeOption>, AppError> {
        let types = self.list_shipment_types().await?;
        Ok(types.into_iter().map(ShipmentTypeOption::from).collect())
    }

    async fn send_step(&self, stock_movement_id: &str) -> Result<StockMovement, AppError> {
        self.stock_movement(stock_movement_id, SEND_STEP_NUMBER).await
    }

    async fn save_shipment(
        &self,
        stock_movement_id: &str,
        payload: SaveShipmentPayload,
    ) -> Result<(), AppError> {
        OpenBoxesClient::save_shipment(self, stock_movement_id, &payload).await
    }

    async fn upload_document(
        &self,
        stock_movement_id: &str,
        file: PendingFile,
    ) -> Result<(), AppError> {
        OpenBoxesClient::upload_document(self, stock_movement_id, &file).await
    }

    async fn transition_status(
        &self,
        stock_movement_id: &str,
        transition: StatusTransition,
    ) -> Result<(), AppError> {
        OpenBoxesClient::transition_status(self, stock_movement_id, &transition).await
    }
}
