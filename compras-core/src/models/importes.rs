use serde::{Deserialize, Serialize};

/// The nine monetary inputs of a purchase invoice: the three IVA taxable
/// bases plus the pass-through amounts that enter the grand total unchanged.
///
/// All fields are independent. Non-negativity is *not* enforced — negative or
/// non-finite values propagate arithmetically through the totals, which is
/// the caller's problem to avoid (form input goes through
/// [`parse_importe`](crate::calculations::importe::parse_importe), which
/// never produces a non-finite value).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportesComprobante {
    /// Base imponible taxed at 21%.
    pub base21: f64,
    /// Base imponible taxed at 10.5%.
    pub base105: f64,
    /// Base imponible taxed at 27%.
    pub base27: f64,
    /// Exempt amount.
    pub exento: f64,
    /// Non-taxed amount.
    pub no_gravado: f64,
    /// IVA perception/withholding.
    pub percep_iva: f64,
    /// Gross-receipts tax (IIBB) perception.
    pub percep_iibb: f64,
    /// Municipal levy.
    pub municipalidad: f64,
    /// Catch-all for any other surcharge.
    pub otros: f64,
}
