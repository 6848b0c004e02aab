//! Purchase report rows and KPI aggregation.
//!
//! Unlike the entry-form totals in [`calculations::iva`](crate::calculations::iva),
//! report figures are *not* rounded per step: the reference report view
//! accumulates raw `base × rate` products, so a multi-row sum can differ
//! from the sum of per-invoice rounded totals by fractions of a cent. That
//! asymmetry is deliberate and kept.

use serde::Serialize;

use crate::calculations::{TASA_105, TASA_21, TASA_27};
use crate::models::Comprobante;

/// One row of the purchases report, shaped for on-screen tables and CSV
/// export. Serde names are the exported CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilaInforme {
    pub fecha: String,
    pub proveedor: String,
    pub cuit: String,
    #[serde(rename = "pv/nro")]
    pub comprobante: String,
    pub base: f64,
    pub exento: f64,
    #[serde(rename = "no grav")]
    pub no_gravado: f64,
    pub iva: f64,
    #[serde(rename = "percep iva")]
    pub percep_iva: f64,
    #[serde(rename = "percep iibb")]
    pub percep_iibb: f64,
    pub otros: f64,
    pub total: f64,
}

/// Aggregate figures shown above the report table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResumenInforme {
    pub total: f64,
    pub iva: f64,
}

fn iva_bruto(c: &Comprobante) -> f64 {
    c.importes.base21 * TASA_21 + c.importes.base105 * TASA_105 + c.importes.base27 * TASA_27
}

fn total_bruto(c: &Comprobante) -> f64 {
    let base = c.base_gravada() + c.importes.exento + c.importes.no_gravado;
    base + iva_bruto(c) + c.importes.percep_iva + c.importes.percep_iibb + c.importes.otros
}

pub fn fila_informe(c: &Comprobante) -> FilaInforme {
    FilaInforme {
        fecha: c.fecha.clone(),
        proveedor: c.proveedor_nombre.clone(),
        cuit: c.proveedor_cuit.clone(),
        comprobante: format!("{}/{}", c.punto_venta, c.numero),
        base: c.base_gravada(),
        exento: c.importes.exento,
        no_gravado: c.importes.no_gravado,
        iva: iva_bruto(c),
        percep_iva: c.importes.percep_iva,
        percep_iibb: c.importes.percep_iibb,
        otros: c.importes.otros,
        total: total_bruto(c),
    }
}

pub fn construir_filas(comprobantes: &[Comprobante]) -> Vec<FilaInforme> {
    comprobantes.iter().map(fila_informe).collect()
}

pub fn resumen(comprobantes: &[Comprobante]) -> ResumenInforme {
    comprobantes.iter().fold(
        ResumenInforme {
            total: 0.0,
            iva: 0.0,
        },
        |acc, c| ResumenInforme {
            total: acc.total + total_bruto(c),
            iva: acc.iva + iva_bruto(c),
        },
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::ImportesComprobante;

    fn comprobante(
        gravado: Option<f64>,
        importes: ImportesComprobante,
    ) -> Comprobante {
        Comprobante {
            id: 1,
            proveedor_id: 7,
            proveedor_nombre: "Papelera Norte".to_string(),
            proveedor_cuit: "30-71234567-1".to_string(),
            punto_venta: "0003".to_string(),
            numero: "00001234".to_string(),
            fecha: "2026-08-01".to_string(),
            gravado,
            importes,
        }
    }

    #[test]
    fn fila_uses_recorded_gravado_when_present() {
        let c = comprobante(
            Some(150.0),
            ImportesComprobante {
                base21: 100.0,
                ..Default::default()
            },
        );

        let fila = fila_informe(&c);

        assert_eq!(fila.base, 150.0);
        assert_eq!(fila.iva, 21.0);
        assert_eq!(fila.total, 171.0);
    }

    #[test]
    fn fila_falls_back_to_sum_of_bases() {
        let c = comprobante(
            None,
            ImportesComprobante {
                base21: 100.0,
                base105: 50.0,
                ..Default::default()
            },
        );

        let fila = fila_informe(&c);

        assert_eq!(fila.base, 150.0);
        assert_eq!(fila.iva, 100.0 * 0.21 + 50.0 * 0.105);
    }

    #[test]
    fn fila_formats_punto_venta_and_numero() {
        let c = comprobante(None, ImportesComprobante::default());

        assert_eq!(fila_informe(&c).comprobante, "0003/00001234");
    }

    #[test]
    fn fila_total_includes_exempt_and_surcharges() {
        let c = comprobante(
            None,
            ImportesComprobante {
                base21: 100.0,
                exento: 10.0,
                no_gravado: 5.0,
                percep_iva: 2.0,
                percep_iibb: 3.0,
                otros: 1.0,
                ..Default::default()
            },
        );

        let fila = fila_informe(&c);

        // 100 base + 10 exento + 5 no gravado + 21 iva + 2 + 3 + 1
        assert_eq!(fila.total, 142.0);
    }

    #[test]
    fn resumen_accumulates_over_all_rows() {
        let lista = vec![
            comprobante(
                None,
                ImportesComprobante {
                    base21: 100.0,
                    ..Default::default()
                },
            ),
            comprobante(
                None,
                ImportesComprobante {
                    base105: 200.0,
                    percep_iibb: 4.0,
                    ..Default::default()
                },
            ),
        ];

        let kpis = resumen(&lista);

        assert_eq!(kpis.iva, 21.0 + 200.0 * 0.105);
        assert_eq!(kpis.total, 121.0 + 200.0 + 200.0 * 0.105 + 4.0);
    }

    #[test]
    fn resumen_of_nothing_is_zero() {
        let kpis = resumen(&[]);

        assert_eq!(kpis.total, 0.0);
        assert_eq!(kpis.iva, 0.0);
    }
}
