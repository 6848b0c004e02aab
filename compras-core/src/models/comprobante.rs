use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::importes::ImportesComprobante;

/// A purchase invoice to be entered into the accounting service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevoComprobante {
    pub proveedor_id: i64,
    /// Punto de venta, as printed on the invoice (e.g. `0003`).
    pub punto_venta: String,
    /// Invoice number within the punto de venta.
    pub numero: String,
    pub fecha: NaiveDate,
    pub importes: ImportesComprobante,
}

/// Acknowledgement returned by the service after entering an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprobanteCreado {
    pub ok: bool,
    pub id: String,
}

/// A purchase invoice as reported back by the accounting service.
///
/// `fecha` is carried as the service sent it — reports and exports print it
/// verbatim, so nothing is gained by forcing a parse here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comprobante {
    pub id: i64,
    pub proveedor_id: i64,
    pub proveedor_nombre: String,
    pub proveedor_cuit: String,
    pub punto_venta: String,
    pub numero: String,
    pub fecha: String,
    /// Taxed base total as the service recorded it. `None` when the service
    /// omitted it; consumers fall back to the sum of the three bases.
    pub gravado: Option<f64>,
    pub importes: ImportesComprobante,
}

impl Comprobante {
    /// The recorded taxed base, or the sum of the three bases when the
    /// service did not report one.
    pub fn base_gravada(&self) -> f64 {
        self.gravado
            .unwrap_or(self.importes.base21 + self.importes.base105 + self.importes.base27)
    }
}

/// Query filter for invoice listings. `proveedor_id = None` means all
/// providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltroComprobantes {
    pub desde: NaiveDate,
    pub hasta: NaiveDate,
    pub proveedor_id: Option<i64>,
}
