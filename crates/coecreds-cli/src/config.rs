//! Mapping of command line options onto library configuration.

use clap::Args;

use coecreds_bundle::BundleConfig;
use coecreds_client::ClientConfig;

/// Connection options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Container-infra API root
    #[arg(long, env = "COECREDS_ENDPOINT", default_value = "http://localhost:9511/v1")]
    pub endpoint: String,

    /// Keystone token sent as X-Auth-Token
    #[arg(long, env = "OS_AUTH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Container-infra API microversion, e.g. "latest" or "1.8"
    #[arg(long)]
    pub api_version: Option<String>,
}

impl ConnectionArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.endpoint.clone(),
            auth_token: self.token.clone(),
            timeout_secs: self.timeout,
            api_version: self.api_version.clone(),
        }
    }
}

/// Key generation options of the `bundle` command.
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// RSA modulus size of the client key
    #[arg(long, default_value = "4096")]
    pub key_bits: usize,
}

impl KeyArgs {
    pub fn bundle_config(&self) -> BundleConfig {
        BundleConfig {
            key_bits: self.key_bits,
            ..Default::default()
        }
    }
}
