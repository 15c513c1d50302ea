//! Send-shipment step workflow.
//!
//! Compiled for both the browser and the server. The page drives it through
//! a backend made of server-function calls; the server and the tests drive
//! it directly against an HTTP client or an in-memory backend.

use shared_types::{
    check_origin, validate, AppError, PendingFile, PendingFiles, SaveShipmentPayload, SendStep,
    ShipmentFormValues, ShipmentTypeOption, StatusTransition, StockMovement, FILE_UPLOAD_ERROR,
    FILE_UPLOAD_SUCCESS,
};

/// Toast shown after a successful Save.
pub const SAVE_SUCCESS_MESSAGE: &str = "Changes saved successfully";

/// The backend calls the send step needs.
#[allow(async_fn_in_trait)]
pub trait ShipmentBackend {
    async fn shipment_types(&self) -> Result<Vec<ShipmentTypeOption>, AppError>;

    /// Step-6 projection of a stock movement.
    async fn send_step(&self, stock_movement_id: &str) -> Result<StockMovement, AppError>;

    async fn save_shipment(
        &self,
        stock_movement_id: &str,
        payload: SaveShipmentPayload,
    ) -> Result<(), AppError>;

    async fn upload_document(
        &self,
        stock_movement_id: &str,
        file: PendingFile,
    ) -> Result<(), AppError>;

    async fn transition_status(
        &self,
        stock_movement_id: &str,
        transition: StatusTransition,
    ) -> Result<(), AppError>;
}

pub async fn load_shipment_types<B: ShipmentBackend>(
    backend: &B,
) -> Result<Vec<ShipmentTypeOption>, AppError> {
    backend.shipment_types().await
}

/// Step data plus the form values refreshed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedStep {
    pub step: SendStep,
    pub values: ShipmentFormValues,
}

impl LoadedStep {
    /// Whether this result belongs to the shipment `current` is editing.
    /// A load that finishes after the page moved to another shipment must
    /// not overwrite its values.
    pub fn applies_to(&self, current: &ShipmentFormValues) -> bool {
        self.values.stock_movement_id == current.stock_movement_id
    }
}

/// Fetch the step-6 projection and fold it into a copy of `values`.
pub async fn load_send_step<B: ShipmentBackend>(
    backend: &B,
    values: &ShipmentFormValues,
) -> Result<LoadedStep, AppError> {
    let movement = backend.send_step(&values.stock_movement_id).await?;
    let mut values = values.clone();
    values.merge_step(&movement);
    Ok(LoadedStep {
        step: SendStep::from_movement(&movement),
        values,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Issued shipments are re-fetched so the page shows what the backend
    /// accepted.
    pub refetch: bool,
}

/// Save button.
pub async fn save<B: ShipmentBackend>(
    backend: &B,
    values: &ShipmentFormValues,
) -> Result<SaveOutcome, AppError> {
    backend
        .save_shipment(&values.stock_movement_id, values.save_payload())
        .await?;
    Ok(SaveOutcome {
        refetch: values.is_issued(),
    })
}

/// Result of a single document upload, surfaced as its own toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadNotice {
    Uploaded(String),
    Failed(String),
}

impl UploadNotice {
    pub fn message(&self) -> &'static str {
        match self {
            UploadNotice::Uploaded(_) => FILE_UPLOAD_SUCCESS,
            UploadNotice::Failed(_) => FILE_UPLOAD_ERROR,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadNotice::Uploaded(_))
    }
}

pub async fn upload<B: ShipmentBackend>(
    backend: &B,
    stock_movement_id: &str,
    file: PendingFile,
) -> UploadNotice {
    let name = file.name.clone();
    match backend.upload_document(stock_movement_id, file).await {
        Ok(()) => UploadNotice::Uploaded(name),
        Err(e) => {
            tracing::warn!(file = %name, error = %e, "document upload failed");
            UploadNotice::Failed(name)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// The origin guard refused; nothing was sent to the backend.
    WrongLocation(AppError),
    Backend(AppError),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::WrongLocation(e) | SubmitError::Backend(e) => write!(f, "{e}"),
        }
    }
}

/// Send shipment.
///
/// Every pending file is handed to `spawn_upload` before the header is
/// saved; uploads are not awaited, so the status transition can finish
/// first.
pub async fn submit<B: ShipmentBackend>(
    backend: &B,
    current_location_id: Option<&str>,
    values: &ShipmentFormValues,
    files: &PendingFiles,
    mut spawn_upload: impl FnMut(PendingFile),
) -> Result<(), SubmitError> {
    check_origin(current_location_id, values).map_err(SubmitError::WrongLocation)?;

    for file in files.iter() {
        spawn_upload(file.clone());
    }

    let id = &values.stock_movement_id;
    backend
        .save_shipment(id, SaveShipmentPayload::Header(values.header_payload()))
        .await
        .map_err(SubmitError::Backend)?;
    backend
        .transition_status(id, StatusTransition::issued())
        .await
        .map_err(SubmitError::Backend)?;

    tracing::info!(stock_movement_id = %id, "shipment issued");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveIntent {
    Previous,
    Exit,
}

/// Confirmation shown when leaving with an invalid form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: &'static str,
    pub message: &'static str,
    /// Dismisses the dialog and stays on the page.
    pub stay_label: &'static str,
    /// Leaves without saving.
    pub proceed_label: &'static str,
}

impl ConfirmPrompt {
    pub fn for_intent(intent: LeaveIntent) -> Self {
        match intent {
            LeaveIntent::Previous => Self {
                title: "Validation error",
                message: "Cannot save due to validation error on page",
                stay_label: "Correct error",
                proceed_label: "Continue (lose unsaved work)",
            },
            LeaveIntent::Exit => Self {
                title: "Confirm save",
                message:
                    "Validation errors occurred. Are you sure you want to exit and lose unsaved data?",
                stay_label: "No",
                proceed_label: "Yes",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Values were saved; navigate now.
    Proceed,
    /// Nothing was saved; ask before navigating.
    Confirm(ConfirmPrompt),
}

/// Previous and Save-and-exit. A valid form is saved first; a failed save
/// returns the error and the caller stays on the page.
pub async fn leave<B: ShipmentBackend>(
    backend: &B,
    values: &ShipmentFormValues,
    intent: LeaveIntent,
) -> Result<LeaveOutcome, AppError> {
    if !validate(values).is_empty() {
        return Ok(LeaveOutcome::Confirm(ConfirmPrompt::for_intent(intent)));
    }
    backend
        .save_shipment(&values.stock_movement_id, values.save_payload())
        .await?;
    Ok(LeaveOutcome::Proceed)
}
