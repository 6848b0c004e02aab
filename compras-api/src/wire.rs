//! Wire DTOs for the retenciones service and their mapping to domain types.
//!
//! Response types are deliberately tolerant: `#[serde(default)]` everywhere,
//! no `deny_unknown_fields`, trimming of text fields. The live service has
//! drifted before and the front-end must keep rendering what it can.

use compras_core::calculations::{TASA_105, TASA_21, TASA_27, round2};
use compras_core::models::{
    Comprobante, ComprobanteCreado, CondicionFiscal, ImportesComprobante, NuevoComprobante,
    NuevoProveedor, Proveedor,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

// ── auth ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Pulls the session token out of a login response.
///
/// Deployments of the auth service have answered with several shapes over
/// time; the first non-blank candidate wins, in this fixed order.
pub(crate) fn extraer_token(cuerpo: &Value) -> Option<String> {
    let candidatos = [
        cuerpo.get("loginToken"),
        cuerpo.get("token"),
        cuerpo.get("accessToken"),
        cuerpo.get("jwt"),
        cuerpo.get("idToken"),
        cuerpo.pointer("/data/loginToken"),
        cuerpo.pointer("/data/token"),
    ];

    candidatos
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

// ── providers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProveedorDto {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub cuit: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub fiscal_condition: String,
    #[serde(default)]
    pub agreement: bool,
    #[serde(default)]
    pub iibb_except: bool,
    #[serde(default)]
    pub municipality_except: bool,
}

impl ProveedorDto {
    pub fn into_domain(self) -> Proveedor {
        let condicion_fiscal = CondicionFiscal::parse(self.fiscal_condition.trim())
            .unwrap_or_else(|| {
                debug!(valor = %self.fiscal_condition, "condición fiscal desconocida, se asume RI");
                CondicionFiscal::default()
            });
        Proveedor {
            id: self.id,
            cuit: self.cuit.trim().to_string(),
            razon_social: self.company_name.trim().to_string(),
            direccion: self.address.trim().to_string(),
            telefono: self
                .phone
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            condicion_fiscal,
            convenio_multilateral: self.agreement,
            exento_iibb: self.iibb_except,
            exento_municipalidad: self.municipality_except,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProveedorPayload<'a> {
    pub company_name: &'a str,
    pub cuit: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub fiscal_condition: &'static str,
    pub agreement: bool,
    pub iibb_except: bool,
    pub municipality_except: bool,
}

impl<'a> ProveedorPayload<'a> {
    pub fn from_domain(alta: &'a NuevoProveedor) -> Self {
        Self {
            company_name: &alta.razon_social,
            cuit: &alta.cuit,
            address: &alta.direccion,
            phone: alta.telefono.as_deref().unwrap_or(""),
            fiscal_condition: alta.condicion_fiscal.as_str(),
            agreement: alta.convenio_multilateral,
            iibb_except: alta.exento_iibb,
            municipality_except: alta.exento_municipalidad,
        }
    }
}

// ── invoices ─────────────────────────────────────────────────────────────────

/// Entry payload, field names as the service expects them.
#[derive(Debug, Serialize)]
pub(crate) struct AltaComprobantePayload {
    #[serde(rename = "proveedorId")]
    pub proveedor_id: String,
    pub pv: String,
    pub nro: String,
    pub fecha: String,
    pub base21: f64,
    pub base105: f64,
    pub base27: f64,
    pub exento: f64,
    #[serde(rename = "noGravado")]
    pub no_gravado: f64,
    #[serde(rename = "percepIVA")]
    pub percep_iva: f64,
    #[serde(rename = "percepIIBB")]
    pub percep_iibb: f64,
    pub otros: f64,
    pub municipality: f64,
}

impl AltaComprobantePayload {
    pub fn from_domain(alta: &NuevoComprobante) -> Self {
        Self {
            proveedor_id: alta.proveedor_id.to_string(),
            pv: alta.punto_venta.clone(),
            nro: alta.numero.clone(),
            fecha: alta.fecha.format("%Y-%m-%d").to_string(),
            base21: alta.importes.base21,
            base105: alta.importes.base105,
            base27: alta.importes.base27,
            exento: alta.importes.exento,
            no_gravado: alta.importes.no_gravado,
            percep_iva: alta.importes.percep_iva,
            percep_iibb: alta.importes.percep_iibb,
            otros: alta.importes.otros,
            municipality: alta.importes.municipalidad,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreadoDto {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub id: String,
}

impl CreadoDto {
    pub fn into_domain(self) -> ComprobanteCreado {
        ComprobanteCreado {
            ok: self.ok,
            id: self.id,
        }
    }
}

/// Invoice as the query endpoint reports it. The service stores IVA
/// *amounts* per bracket; the taxable bases the front-end works with are
/// re-derived from them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FacturaDto {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub point_sale: Option<i64>,
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub provider: Option<ProveedorResumenDto>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub engraved: Option<f64>,
    #[serde(default)]
    pub exempt: f64,
    #[serde(default)]
    pub iva105: f64,
    #[serde(default)]
    pub iva21: f64,
    #[serde(default)]
    pub iva27: Option<f64>,
    #[serde(default)]
    pub iibb: f64,
    #[serde(default)]
    pub taxed_others: f64,
    #[serde(default)]
    pub municipality: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProveedorResumenDto {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub cuit: String,
}

/// Taxable base behind an IVA amount: `amount / rate`, rounded to cents.
/// Zero or negative amounts stay zero.
fn base_desde_iva(
    iva: f64,
    tasa: f64,
) -> f64 {
    if iva > 0.0 { round2(iva / tasa) } else { 0.0 }
}

impl FacturaDto {
    pub fn into_domain(self) -> Comprobante {
        let base21 = base_desde_iva(self.iva21, TASA_21);
        let base105 = base_desde_iva(self.iva105, TASA_105);
        let base27 = base_desde_iva(self.iva27.unwrap_or(0.0), TASA_27);
        // The municipal levy comes back folded into "otros": the query
        // endpoint reports it separately but the report treats both as one
        // pass-through bucket.
        let otros = self.taxed_others + self.municipality;

        let (proveedor_id, proveedor_nombre, proveedor_cuit) = match self.provider {
            Some(p) => (p.id, p.company_name, p.cuit),
            None => (0, String::new(), String::new()),
        };

        Comprobante {
            id: self.id,
            proveedor_id,
            proveedor_nombre,
            proveedor_cuit,
            punto_venta: self.point_sale.map(|v| v.to_string()).unwrap_or_default(),
            numero: self.number.map(|v| v.to_string()).unwrap_or_default(),
            fecha: self.date,
            gravado: self.engraved,
            importes: ImportesComprobante {
                base21,
                base105,
                base27,
                exento: self.exempt,
                no_gravado: 0.0,
                percep_iva: 0.0,
                percep_iibb: self.iibb,
                municipalidad: 0.0,
                otros,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    // =========================================================================
    // extraer_token tests
    // =========================================================================

    #[test]
    fn token_directo_en_cada_campo_conocido() {
        for campo in ["loginToken", "token", "accessToken", "jwt", "idToken"] {
            let cuerpo = json!({ campo: "abc" });
            assert_eq!(
                extraer_token(&cuerpo),
                Some("abc".to_string()),
                "campo {campo}"
            );
        }
    }

    #[test]
    fn token_anidado_en_data() {
        assert_eq!(
            extraer_token(&json!({ "data": { "loginToken": "x" } })),
            Some("x".to_string())
        );
        assert_eq!(
            extraer_token(&json!({ "data": { "token": "y" } })),
            Some("y".to_string())
        );
    }

    #[test]
    fn primer_candidato_no_vacio_gana() {
        let cuerpo = json!({ "loginToken": "  ", "token": "real" });

        assert_eq!(extraer_token(&cuerpo), Some("real".to_string()));
    }

    #[test]
    fn token_se_recorta() {
        assert_eq!(
            extraer_token(&json!({ "token": "  abc  " })),
            Some("abc".to_string())
        );
    }

    #[test]
    fn sin_token_es_none() {
        assert_eq!(extraer_token(&json!({})), None);
        assert_eq!(extraer_token(&json!({ "token": 42 })), None);
        assert_eq!(extraer_token(&json!({ "token": "" })), None);
    }

    // =========================================================================
    // ProveedorDto tests
    // =========================================================================

    #[test]
    fn proveedor_se_mapea_con_recortes() {
        let dto: ProveedorDto = serde_json::from_value(json!({
            "id": 7,
            "cuit": " 30-71234567-1 ",
            "companyName": " Papelera Norte ",
            "address": "Mitre 450",
            "phone": "",
            "fiscalCondition": "MT",
            "agreement": true,
            "iibbExcept": false,
            "municipalityExcept": true
        }))
        .expect("dto");

        let p = dto.into_domain();

        assert_eq!(p.id, 7);
        assert_eq!(p.cuit, "30-71234567-1");
        assert_eq!(p.razon_social, "Papelera Norte");
        assert_eq!(p.telefono, None);
        assert_eq!(p.condicion_fiscal, CondicionFiscal::Monotributo);
        assert!(p.convenio_multilateral);
        assert!(p.exento_municipalidad);
    }

    #[test]
    fn proveedor_con_campos_ausentes_usa_defaults() {
        let dto: ProveedorDto = serde_json::from_value(json!({ "id": 1 })).expect("dto");

        let p = dto.into_domain();

        assert_eq!(p.razon_social, "");
        assert_eq!(p.condicion_fiscal, CondicionFiscal::ResponsableInscripto);
    }

    #[test]
    fn payload_de_proveedor_serializa_en_camel_case() {
        let alta = NuevoProveedor {
            cuit: "20-12345678-6".to_string(),
            razon_social: "Acme".to_string(),
            direccion: "Calle 1".to_string(),
            telefono: None,
            condicion_fiscal: CondicionFiscal::Exento,
            convenio_multilateral: false,
            exento_iibb: true,
            exento_municipalidad: false,
        };

        let valor = serde_json::to_value(ProveedorPayload::from_domain(&alta)).expect("json");

        assert_eq!(
            valor,
            json!({
                "companyName": "Acme",
                "cuit": "20-12345678-6",
                "address": "Calle 1",
                "phone": "",
                "fiscalCondition": "EX",
                "agreement": false,
                "iibbExcept": true,
                "municipalityExcept": false
            })
        );
    }

    // =========================================================================
    // FacturaDto tests
    // =========================================================================

    #[test]
    fn factura_rederiva_bases_desde_los_montos_de_iva() {
        let dto: FacturaDto = serde_json::from_value(json!({
            "id": 5,
            "pointSale": 3,
            "number": 1234,
            "provider": { "id": 7, "companyName": "X SA", "cuit": "30-1" },
            "date": "2026-08-01",
            "engraved": 150.0,
            "exempt": 10.0,
            "iva21": 21.0,
            "iva105": 10.5,
            "iva27": 27.0,
            "iibb": 2.0,
            "taxedOthers": 1.0,
            "municipality": 2.0
        }))
        .expect("dto");

        let c = dto.into_domain();

        assert_eq!(c.importes.base21, 100.0);
        assert_eq!(c.importes.base105, 100.0);
        assert_eq!(c.importes.base27, 100.0);
        assert_eq!(c.importes.otros, 3.0);
        assert_eq!(c.importes.percep_iibb, 2.0);
        assert_eq!(c.importes.percep_iva, 0.0);
        assert_eq!(c.gravado, Some(150.0));
        assert_eq!(c.punto_venta, "3");
        assert_eq!(c.numero, "1234");
        assert_eq!(c.proveedor_nombre, "X SA");
    }

    #[test]
    fn factura_sin_iva_deja_bases_en_cero() {
        let dto: FacturaDto = serde_json::from_value(json!({
            "id": 1,
            "iva21": 0.0,
            "iva105": -5.0
        }))
        .expect("dto");

        let c = dto.into_domain();

        assert_eq!(c.importes.base21, 0.0);
        assert_eq!(c.importes.base105, 0.0);
        assert_eq!(c.importes.base27, 0.0);
        assert_eq!(c.gravado, None);
    }

    #[test]
    fn factura_minima_no_revienta() {
        let dto: FacturaDto = serde_json::from_value(json!({})).expect("dto");

        let c = dto.into_domain();

        assert_eq!(c.id, 0);
        assert_eq!(c.proveedor_nombre, "");
        assert_eq!(c.punto_venta, "");
        assert_eq!(c.base_gravada(), 0.0);
    }

    #[test]
    fn alta_de_comprobante_serializa_los_nombres_del_servicio() {
        use chrono::NaiveDate;
        use compras_core::models::NuevoComprobante;

        let alta = NuevoComprobante {
            proveedor_id: 7,
            punto_venta: "0003".to_string(),
            numero: "00001234".to_string(),
            fecha: NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date"),
            importes: ImportesComprobante {
                base21: 100.0,
                percep_iva: 2.0,
                municipalidad: 1.5,
                ..Default::default()
            },
        };

        let valor = serde_json::to_value(AltaComprobantePayload::from_domain(&alta)).expect("json");

        assert_eq!(valor["proveedorId"], "7");
        assert_eq!(valor["pv"], "0003");
        assert_eq!(valor["nro"], "00001234");
        assert_eq!(valor["fecha"], "2026-08-01");
        assert_eq!(valor["base21"], 100.0);
        assert_eq!(valor["percepIVA"], 2.0);
        assert_eq!(valor["percepIIBB"], 0.0);
        assert_eq!(valor["noGravado"], 0.0);
        assert_eq!(valor["municipality"], 1.5);
    }
}
