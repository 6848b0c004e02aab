//! Subcommand implementations.

pub mod factura;
pub mod informes;
pub mod proveedores;
pub mod sesion;

use anyhow::{Context, Result};
use compras_api::{ClienteConfig, ClienteRetenciones, SessionStore};

use crate::config::directorio_config;

/// Backend wired to the session file in the config directory.
pub fn construir_backend(config: &ClienteConfig) -> Result<ClienteRetenciones> {
    let sesion = SessionStore::en_directorio(&directorio_config());
    ClienteRetenciones::new(config, sesion).context("no se pudo construir el cliente HTTP")
}
