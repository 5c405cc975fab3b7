//! Client configuration.

/// Connection settings for the container-infra service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Versioned service root, e.g. "http://controller:9511/v1".
    pub base_url: String,

    /// Keystone token sent as `X-Auth-Token`.
    pub auth_token: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Microversion sent as `OpenStack-API-Version: container-infra <version>`.
    pub api_version: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9511/v1".to_string(),
            auth_token: None,
            timeout_secs: 30,
            api_version: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the auth token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}
