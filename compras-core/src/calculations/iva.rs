//! IVA breakdown and invoice totals.
//!
//! Statutory bracket rates are fixed: 21%, 10.5% and 27%. The functions are
//! total over finite inputs; non-finite inputs are not sanitized and simply
//! propagate as NaN through every derived field.

use serde::{Deserialize, Serialize};

use crate::calculations::common::round2;
use crate::models::ImportesComprobante;

/// General IVA rate.
pub const TASA_21: f64 = 0.21;
/// Reduced IVA rate.
pub const TASA_105: f64 = 0.105;
/// Increased IVA rate (utilities and a few services).
pub const TASA_27: f64 = 0.27;

/// Per-bracket IVA amounts and their aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesgloseIva {
    pub iva21: f64,
    pub iva105: f64,
    pub iva27: f64,
    pub total_iva: f64,
}

/// Full derived view of an invoice: IVA breakdown, subtotal and grand total.
///
/// Recomputed from the current form state on every change and discarded on
/// navigation — never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalesComprobante {
    pub iva21: f64,
    pub iva105: f64,
    pub iva27: f64,
    pub total_iva: f64,
    pub subtotal: f64,
    pub total: f64,
}

/// Computes the IVA amount for each bracket and the aggregate.
///
/// Each bracket amount is rounded to cents on its own; the aggregate is the
/// sum of the *rounded* amounts, rounded again. The second rounding is a
/// no-op for cent-aligned addends but pins down the computation order, and
/// is kept for compatibility with the reference behavior.
pub fn calc_iva(
    base21: f64,
    base105: f64,
    base27: f64,
) -> DesgloseIva {
    let iva21 = round2(base21 * TASA_21);
    let iva105 = round2(base105 * TASA_105);
    let iva27 = round2(base27 * TASA_27);
    let total_iva = round2(iva21 + iva105 + iva27);
    DesgloseIva {
        iva21,
        iva105,
        iva27,
        total_iva,
    }
}

/// Computes subtotal and grand total for an invoice entry.
///
/// The subtotal covers the three taxable bases plus the exempt and non-taxed
/// amounts; the grand total adds the aggregate IVA and every pass-through
/// surcharge. Inputs are not validated — negatives flow through the
/// arithmetic unchanged.
pub fn calc_total(importes: &ImportesComprobante) -> TotalesComprobante {
    let DesgloseIva {
        iva21,
        iva105,
        iva27,
        total_iva,
    } = calc_iva(importes.base21, importes.base105, importes.base27);

    let subtotal = importes.base21
        + importes.base105
        + importes.base27
        + importes.exento
        + importes.no_gravado;
    let total = round2(
        subtotal
            + total_iva
            + importes.percep_iva
            + importes.percep_iibb
            + importes.municipalidad
            + importes.otros,
    );

    TotalesComprobante {
        iva21,
        iva105,
        iva27,
        total_iva,
        subtotal: round2(subtotal),
        total,
    }
}
