//! Invoice arithmetic: amount parsing, cent rounding and IVA computation.
//!
//! Everything in here is a pure function over `f64` — no I/O, no state, safe
//! to call from anywhere and as often as the caller likes (the entry form
//! recomputes on every keystroke).

pub mod common;
pub mod importe;
pub mod iva;

pub use common::round2;
pub use importe::{importe_or_zero, parse_importe};
pub use iva::{DesgloseIva, TASA_105, TASA_21, TASA_27, TotalesComprobante, calc_iva, calc_total};
