use std::{collections::HashMap, fmt, path::Path, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::gateway::EndpointConfig;

/// Prefix of the environment variables read at startup, e.g. `CROSSCORE_API_TENANT_ID`.
pub const ENV_PREFIX: &str = "CROSSCORE_API";

/// Connect timeout used when the configuration does not set one.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the CrossCore API.
///
/// Loaded once at startup and handed to [`crate::factory::ServiceFactory`].
/// Keys are snake_case in files and upper case behind [`ENV_PREFIX`] in the
/// environment; environment values override the file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossCoreApiConfig {
    /// Client identifier issued by the provider
    pub tenant_id: String,
    /// Full URL identity checks are POSTed to
    pub endpoint_uri: String,
    /// Shared secret for the `hmac-signature` header
    pub hmac_key: String,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// PEM file with the client certificate and key, when mutual TLS is required
    #[serde(default)]
    pub client_identity_pem: Option<PathBuf>,
}

impl CrossCoreApiConfig {
    /// Loads the configuration from an optional file, then `CROSSCORE_API_*` variables.
    ///
    /// # Arguments
    ///
    /// * `config_file` - JSON, TOML or YAML file; the format follows the extension.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let config: Self = layered(config_file, None)?;

        log::info!("Loaded CrossCore API config: {config:?}");

        Ok(config)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS))
    }

    pub fn endpoint(&self) -> EndpointConfig {
        EndpointConfig {
            endpoint_uri: self.endpoint_uri.clone(),
            tenant_id: self.tenant_id.clone(),
        }
    }
}

impl fmt::Debug for CrossCoreApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossCoreApiConfig")
            .field("tenant_id", &self.tenant_id)
            .field("endpoint_uri", &self.endpoint_uri)
            .field("hmac_key", &"<redacted>")
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("client_identity_pem", &self.client_identity_pem)
            .finish()
    }
}

/// Just the signing key, for tools that sign bodies without calling the provider.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SigningKeyConfig {
    pub hmac_key: String,
}

impl SigningKeyConfig {
    /// Loads `hmac_key` from the same sources as [`CrossCoreApiConfig::load`].
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        layered(config_file, None)
    }
}

impl fmt::Debug for SigningKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeyConfig")
            .field("hmac_key", &"<redacted>")
            .finish()
    }
}

/// Builds `T` from the file (if any) overlaid with prefixed environment variables.
///
/// `env` replaces the process environment when set. Numbers are not parsed
/// eagerly, so digit-only ids and keys keep their leading zeros.
fn layered<T: DeserializeOwned>(
    config_file: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<T> {
    let mut builder = ::config::Config::builder();

    if let Some(path) = config_file {
        builder = builder.add_source(::config::File::from(path).required(true));
    }

    builder = builder.add_source(
        ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .ignore_empty(true)
            .source(env),
    );

    let source = match config_file {
        Some(path) => format!("{} and {ENV_PREFIX}_* variables", path.display()),
        None => format!("{ENV_PREFIX}_* variables"),
    };

    builder
        .build()
        .and_then(|c| c.try_deserialize())
        .with_context(|| format!("Failed to load CrossCore API config from {source}"))
}
