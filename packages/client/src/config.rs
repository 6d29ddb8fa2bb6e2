//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings shared by every HTTP client in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    /// Base URL of the admin API (e.g. `http://localhost:4000`).
    pub base_url: String,
    /// Bearer token sent with every request when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            auth_token: None,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ApiConfig::new("http://cms.local/");
        assert_eq!(config.url("/api/admin/cms/layouts"), "http://cms.local/api/admin/cms/layouts");
        assert_eq!(config.url("api/upload/image"), "http://cms.local/api/upload/image");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{ "authToken": "t" }"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:4000");
        assert_eq!(config.auth_token.as_deref(), Some("t"));
        assert_eq!(config.timeout_secs, 30);
    }
}
