use shared_types::{AppConfig, BackendConfig, FeatureFlags};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml` (plus `.env`), apply environment overrides and store
/// the result in the global `OnceLock`. Safe to call multiple times: only
/// the first call has effect.
///
/// If the file is missing or unparseable, defaults are used.
pub fn load_config() {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let mut config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => parse_config(&contents),
            Err(e) => {
                tracing::warn!(path = CONFIG_PATH, error = %e, "config file not found, using defaults");
                AppConfig::default()
            }
        };
        apply_env_overrides(&mut config.backend, |key| std::env::var(key).ok());
        tracing::info!(
            features = ?config.features,
            backend = %config.backend.base_url,
            login = config.backend.has_credentials(),
            "configuration loaded"
        );
        config
    });
}

fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(path = CONFIG_PATH, error = %e, "failed to parse config, using defaults");
        AppConfig::default()
    })
}

/// `OPENBOXES_*` variables win over the file so secrets can stay out of it.
fn apply_env_overrides(backend: &mut BackendConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = var("OPENBOXES_BASE_URL") {
        backend.base_url = url;
    }
    if let Some(user) = var("OPENBOXES_USERNAME") {
        backend.username = Some(user);
    }
    if let Some(password) = var("OPENBOXES_PASSWORD") {
        backend.password = Some(password);
    }
    if let Some(location) = var("OPENBOXES_LOCATION_ID") {
        backend.location_id = Some(location);
    }
    if let Some(timeout) = var("OPENBOXES_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        backend.timeout_secs = timeout;
    }
}

/// Loaded configuration. Falls back to defaults if `load_config()` hasn't
/// been called yet.
pub fn app_config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

pub fn feature_flags() -> &'static FeatureFlags {
    &app_config().features
}

pub fn backend_config() -> &'static BackendConfig {
    &app_config().backend
}

/// Maximum accepted request body, mostly bounded by document uploads.
pub fn max_upload_bytes() -> usize {
    std::env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(50 * 1024 * 1024)
}
