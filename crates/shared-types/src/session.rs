use serde::{Deserialize, Serialize};

/// What the client needs to know about the backend session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionContext {
    /// Location the user is currently acting from.
    pub current_location_id: Option<String>,
    /// Public base URL of the warehouse backend, context path included.
    pub backend_url: String,
}

impl SessionContext {
    /// Detail view of a stock movement on the backend. Submitting and
    /// "save and exit" both leave the wizard for this page.
    pub fn stock_movement_show_url(&self, stock_movement_id: &str) -> String {
        format!(
            "{}/stockMovement/show/{}",
            self.backend_url.trim_end_matches('/'),
            stock_movement_id
        )
    }

    /// Resolve a document link. Backend URIs are absolute paths on the
    /// backend host (context path included), so only scheme and host are
    /// taken from `backend_url`.
    pub fn document_url(&self, uri: &str) -> String {
        if uri.contains("://") {
            return uri.to_string();
        }
        let origin = match self.backend_url.find("://") {
            Some(scheme_end) => {
                let host_start = scheme_end + 3;
                let host_end = self.backend_url[host_start..]
                    .find('/')
                    .map_or(self.backend_url.len(), |i| host_start + i);
                &self.backend_url[..host_end]
            }
            None => "",
        };
        if uri.starts_with('/') {
            format!("{origin}{uri}")
        } else {
            format!("{}/{uri}", self.backend_url.trim_end_matches('/'))
        }
    }
}
