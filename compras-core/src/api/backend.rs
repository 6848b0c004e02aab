use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Comprobante, ComprobanteCreado, FiltroComprobantes, NuevoComprobante, NuevoProveedor,
    Proveedor,
};

/// Errors surfaced by the remote accounting backend.
///
/// There is deliberately no retry machinery behind these: every failure is
/// reported once and the operator decides what to do next.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The stored session is missing or the service answered 401. The local
    /// session has already been cleared when this is returned.
    #[error("la sesión expiró o no existe; inicie sesión nuevamente")]
    AuthExpired,

    /// The login endpoint rejected the credentials.
    #[error("credenciales rechazadas: {0}")]
    InvalidCredentials(String),

    /// The login endpoint answered 2xx but no token could be found in the
    /// response body.
    #[error("la respuesta de login no contiene un token")]
    TokenMissing,

    /// Transport-level failure (connection refused, timeout, TLS, …).
    #[error("fallo de red en {endpoint}: {detail}")]
    Http { endpoint: String, detail: String },

    /// The service answered with a non-success status other than 401.
    #[error("{endpoint} respondió HTTP {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body did not match the expected schema.
    #[error("no se pudo interpretar la respuesta de {endpoint}: {detail}")]
    Decode { endpoint: String, detail: String },

    /// Reading or writing the persisted session failed.
    #[error("error de sesión local: {0}")]
    Session(String),
}

/// Operations the administrative front-end needs from the accounting
/// service. One implementation exists (the HTTP client in `compras-api`);
/// the trait keeps commands testable against a stub.
#[async_trait]
pub trait ComprasBackend: Send + Sync {
    /// Authenticates and persists the session token for later calls.
    async fn login(
        &self,
        usuario: &str,
        clave: &str,
    ) -> Result<(), ApiError>;

    /// Full provider list.
    async fn listar_proveedores(&self) -> Result<Vec<Proveedor>, ApiError>;

    /// Server-side provider search.
    async fn buscar_proveedores(
        &self,
        consulta: &str,
    ) -> Result<Vec<Proveedor>, ApiError>;

    async fn crear_proveedor(
        &self,
        alta: &NuevoProveedor,
    ) -> Result<Proveedor, ApiError>;

    async fn actualizar_proveedor(
        &self,
        id: i64,
        cambios: &NuevoProveedor,
    ) -> Result<Proveedor, ApiError>;

    /// Enters a purchase invoice.
    async fn crear_comprobante(
        &self,
        alta: &NuevoComprobante,
    ) -> Result<ComprobanteCreado, ApiError>;

    /// Invoices in a date range, optionally restricted to one provider.
    async fn listar_comprobantes(
        &self,
        filtro: &FiltroComprobantes,
    ) -> Result<Vec<Comprobante>, ApiError>;
}
