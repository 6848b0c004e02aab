//! Plain-text tables for terminal output.

use compras_core::models::Proveedor;
use compras_core::report::FilaInforme;

fn si_no(valor: bool) -> &'static str {
    if valor { "Sí" } else { "No" }
}

/// Truncates long text so columns stay aligned.
fn recortar(
    texto: &str,
    ancho: usize,
) -> String {
    if texto.chars().count() <= ancho {
        texto.to_string()
    } else {
        let corto: String = texto.chars().take(ancho.saturating_sub(1)).collect();
        format!("{corto}…")
    }
}

pub fn tabla_proveedores(lista: &[&Proveedor]) -> String {
    let mut salida = String::new();
    salida.push_str(&format!(
        "{:>5}  {:<30} {:<14} {:<24} {:<12} {:<5} {:<5} {:<8} {:<9}\n",
        "ID",
        "Razón social",
        "CUIT",
        "Dirección",
        "Teléfono",
        "Cond.",
        "Conv.",
        "IIBB Ex.",
        "Munic. Ex."
    ));
    for p in lista {
        salida.push_str(&format!(
            "{:>5}  {:<30} {:<14} {:<24} {:<12} {:<5} {:<5} {:<8} {:<9}\n",
            p.id,
            recortar(&p.razon_social, 30),
            p.cuit,
            recortar(&p.direccion, 24),
            p.telefono.as_deref().unwrap_or("-"),
            p.condicion_fiscal.as_str(),
            si_no(p.convenio_multilateral),
            si_no(p.exento_iibb),
            si_no(p.exento_municipalidad),
        ));
    }
    salida
}

pub fn tabla_informe(filas: &[FilaInforme]) -> String {
    let mut salida = String::new();
    salida.push_str(&format!(
        "{:<10} {:<24} {:<14} {:<14} {:>12} {:>10} {:>10} {:>12} {:>11} {:>12} {:>10} {:>12}\n",
        "Fecha",
        "Proveedor",
        "CUIT",
        "PV/Nro",
        "Base",
        "Exento",
        "No Grav",
        "IVA",
        "Percep IVA",
        "Percep IIBB",
        "Otros",
        "Total"
    ));
    for f in filas {
        salida.push_str(&format!(
            "{:<10} {:<24} {:<14} {:<14} {:>12.2} {:>10.2} {:>10.2} {:>12.2} {:>11.2} {:>12.2} {:>10.2} {:>12.2}\n",
            recortar(&f.fecha, 10),
            recortar(&f.proveedor, 24),
            f.cuit,
            recortar(&f.comprobante, 14),
            f.base,
            f.exento,
            f.no_gravado,
            f.iva,
            f.percep_iva,
            f.percep_iibb,
            f.otros,
            f.total,
        ));
    }
    salida
}

#[cfg(test)]
mod tests {
    use compras_core::models::CondicionFiscal;

    use super::*;

    fn proveedor() -> Proveedor {
        Proveedor {
            id: 7,
            cuit: "30-71234567-1".to_string(),
            razon_social: "Papelera Norte".to_string(),
            direccion: "Mitre 450".to_string(),
            telefono: None,
            condicion_fiscal: CondicionFiscal::Monotributo,
            convenio_multilateral: true,
            exento_iibb: false,
            exento_municipalidad: false,
        }
    }

    #[test]
    fn proveedores_incluye_encabezado_y_datos() {
        let p = proveedor();

        let tabla = tabla_proveedores(&[&p]);

        assert!(tabla.starts_with("   ID"));
        assert!(tabla.contains("Papelera Norte"));
        assert!(tabla.contains("30-71234567-1"));
        assert!(tabla.contains("MT"));
        assert!(tabla.contains("Sí"));
    }

    #[test]
    fn informe_alinea_los_importes_a_dos_decimales() {
        let fila = FilaInforme {
            fecha: "2026-08-01".to_string(),
            proveedor: "X SA".to_string(),
            cuit: "30-1".to_string(),
            comprobante: "3/1234".to_string(),
            base: 100.0,
            exento: 0.0,
            no_gravado: 0.0,
            iva: 21.0,
            percep_iva: 0.0,
            percep_iibb: 2.0,
            otros: 0.0,
            total: 123.0,
        };

        let tabla = tabla_informe(&[fila]);

        assert!(tabla.contains("100.00"));
        assert!(tabla.contains("123.00"));
        assert!(tabla.lines().count() == 2);
    }

    #[test]
    fn recortar_agrega_elipsis() {
        assert_eq!(recortar("corto", 10), "corto");
        assert_eq!(recortar("una razón social larguísima", 10), "una razón…");
    }
}
