//! CLI configuration: a small TOML file plus environment and flag overrides.
//!
//! Resolution order for the service URL: `--base-url` flag, then
//! `COMPRAS_API_BASE`, then the config file, then the production default.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use compras_api::{ClienteConfig, config::BASE_URL_PRODUCCION};
use serde::Deserialize;

/// On-disk shape of `config.toml`. Every field optional — an empty or
/// missing file is a valid configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchivoConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Where config and session files live: `$COMPRAS_CONFIG_DIR` when set,
/// otherwise `~/.config/compras`.
pub fn directorio_config() -> PathBuf {
    if let Some(dir) = env::var_os("COMPRAS_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let home = env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("compras")
}

/// Reads a config file; a missing file yields the default configuration.
pub fn cargar_archivo(path: &Path) -> Result<ArchivoConfig> {
    if !path.exists() {
        return Ok(ArchivoConfig::default());
    }
    let contenido = std::fs::read_to_string(path)
        .with_context(|| format!("no se pudo leer '{}'", path.display()))?;
    toml::from_str(&contenido)
        .with_context(|| format!("configuración inválida en '{}'", path.display()))
}

/// Merges flag, environment and file into the client configuration.
///
/// `env_base` / `env_timeout` are passed in instead of read here so the
/// precedence logic stays testable without touching the process environment.
pub fn resolver(
    flag_base_url: Option<&str>,
    env_base: Option<&str>,
    env_timeout: Option<u64>,
    archivo: &ArchivoConfig,
) -> Result<ClienteConfig> {
    let base = flag_base_url
        .or(env_base)
        .or(archivo.base_url.as_deref())
        .unwrap_or(BASE_URL_PRODUCCION);

    let mut config = ClienteConfig::parse(base).context("URL del servicio inválida")?;
    if let Some(timeout) = env_timeout.or(archivo.timeout_secs) {
        config.timeout_secs = timeout;
    }
    Ok(config)
}

/// Reads the overrides from the real process environment.
pub fn overrides_de_entorno() -> (Option<String>, Option<u64>) {
    let base = env::var("COMPRAS_API_BASE").ok();
    let timeout = env::var("COMPRAS_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok());
    (base, timeout)
}
