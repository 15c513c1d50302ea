use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at server startup. Every field defaults to
/// `false` so that a missing or incomplete config file disables all
/// optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub telemetry: bool,
}

/// Connection settings for the warehouse backend.
///
/// `base_url` includes the servlet context path, e.g.
/// `http://localhost:8080/openboxes`. Credentials are optional; without
/// them no login call is made and the backend must accept anonymous calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Location the session acts from. Drives the origin guard on submit.
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/openboxes".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            password: None,
            location_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Whether a login call should be made before the first request.
    pub fn has_credentials(&self) -> bool {
        matches!((&self.username, &self.password), (Some(u), Some(_)) if !u.is_empty())
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_all_false() {
        let flags = FeatureFlags::default();
        assert!(!flags.telemetry);
    }

    #[test]
    fn deserialize_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.features, FeatureFlags::default());
        assert_eq!(config.backend, BackendConfig::default());
        assert_eq!(config.backend.timeout_secs, 30);
    }

    #[test]
    fn deserialize_partial_backend_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [backend]
            base_url = "https://wms.example.org/openboxes/"
            location_id = "8a8a9e9665c4f59d0165c54ec6b10027"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.backend.trimmed_base_url(),
            "https://wms.example.org/openboxes"
        );
        assert_eq!(
            config.backend.location_id.as_deref(),
            Some("8a8a9e9665c4f59d0165c54ec6b10027")
        );
        assert!(!config.backend.has_credentials());
        assert!(!config.features.telemetry);
    }

    #[test]
    fn credentials_require_username_and_password() {
        let mut backend = BackendConfig {
            username: Some("admin".into()),
            ..BackendConfig::default()
        };
        assert!(!backend.has_credentials());
        backend.password = Some("password".into());
        assert!(backend.has_credentials());
        backend.username = Some(String::new());
        assert!(!backend.has_credentials());
    }

    #[test]
    fn deserialize_full_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [features]
            telemetry = true

            [backend]
            base_url = "http://localhost:8080/openboxes"
            username = "admin"
            password = "password"
            location_id = "1"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert!(config.features.telemetry);
        assert!(config.backend.has_credentials());
        assert_eq!(config.backend.timeout_secs, 5);
    }

    #[test]
    fn deserialize_json_with_missing_fields_defaults() {
        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert_eq!(flags, FeatureFlags::default());
    }
}
