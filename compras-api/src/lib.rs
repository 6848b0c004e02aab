//! HTTP backend for the purchases front-end.
//!
//! Implements [`compras_core::ComprasBackend`] against the remote
//! "retenciones" accounting service. All paths hang off
//! `{base_url}/v1/retenciones/`. Failures are surfaced once — there is no
//! retry layer, no cache.

pub mod client;
pub mod config;
pub mod session;
mod wire;

pub use client::ClienteRetenciones;
pub use config::{ClienteConfig, ConfigError};
pub use session::SessionStore;
