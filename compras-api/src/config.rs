//! Client configuration: where the accounting service lives.

use thiserror::Error;
use url::Url;

/// Production deployment of the accounting service.
pub const BASE_URL_PRODUCCION: &str = "https://miadmin-d03d0c76af30.herokuapp.com";

const TIMEOUT_SECS_DEFECTO: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("URL de servicio inválida '{0}': {1}")]
    InvalidUrl(String, String),
}

/// Connection settings for [`ClienteRetenciones`](crate::ClienteRetenciones).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClienteConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
}

impl ClienteConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_secs: TIMEOUT_SECS_DEFECTO,
        }
    }

    /// Builds a configuration from an already-resolved base URL string
    /// (the CLI merges file, env and flag before calling this).
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?;
        Ok(Self::new(url))
    }

    /// Environment-driven configuration.
    ///
    /// - `COMPRAS_API_BASE` (default: the production deployment)
    /// - `COMPRAS_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = std::env::var("COMPRAS_API_BASE")
            .unwrap_or_else(|_| BASE_URL_PRODUCCION.to_string());
        let mut config = Self::parse(&base)?;
        if let Some(timeout) = std::env::var("COMPRAS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }
}
