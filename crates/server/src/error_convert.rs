use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Convert a transport-level reqwest error into an AppError.
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        return AppError::upstream("Warehouse backend timed out");
    }
    if err.is_connect() {
        return AppError::upstream("Warehouse backend is unreachable");
    }
    if err.is_decode() {
        return AppError::upstream(format!("Unexpected response from warehouse backend: {err}"));
    }
    match err.status() {
        Some(status) => AppError::from_backend_status(status.as_u16(), err.to_string()),
        None => AppError::upstream(err.to_string()),
    }
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_app_error(self) -> AppError {
        reqwest_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}
