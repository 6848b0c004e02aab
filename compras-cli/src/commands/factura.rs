//! `factura`: quick invoice entry with a live totals preview.

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use clap::Args;
use compras_api::ClienteRetenciones;
use compras_core::ComprasBackend;
use compras_core::calculations::{TotalesComprobante, calc_total, parse_importe};
use compras_core::models::{
    ImportesComprobante, NuevoComprobante, Proveedor, filtrar_proveedores,
};

#[derive(Debug, Default, Args)]
pub struct FacturaArgs {
    /// Proveedor por id.
    #[arg(long, conflicts_with = "proveedor")]
    pub proveedor_id: Option<i64>,

    /// Proveedor por texto (razón social, CUIT o dirección); debe
    /// identificar exactamente uno.
    #[arg(long)]
    pub proveedor: Option<String>,

    /// Punto de venta.
    #[arg(long, required_unless_present = "solo_calcular")]
    pub pv: Option<String>,

    /// Número de comprobante.
    #[arg(long, required_unless_present = "solo_calcular")]
    pub nro: Option<String>,

    /// Fecha del comprobante; por defecto, hoy.
    #[arg(long)]
    pub fecha: Option<NaiveDate>,

    // The nine amounts arrive as raw text and go through the tolerant
    // parser, so both "1.234,56" and "1,234.56" work.
    #[arg(long)]
    pub base21: Option<String>,
    #[arg(long)]
    pub base105: Option<String>,
    #[arg(long)]
    pub base27: Option<String>,
    #[arg(long)]
    pub exento: Option<String>,
    #[arg(long)]
    pub no_gravado: Option<String>,
    #[arg(long)]
    pub percep_iva: Option<String>,
    #[arg(long)]
    pub percep_iibb: Option<String>,
    #[arg(long)]
    pub municipalidad: Option<String>,
    #[arg(long)]
    pub otros: Option<String>,

    /// Muestra el desglose de IVA y el total sin enviar nada al servicio.
    #[arg(long)]
    pub solo_calcular: bool,
}

/// The amounts as typed, run through the tolerant parser.
pub fn importes_de(args: &FacturaArgs) -> ImportesComprobante {
    ImportesComprobante {
        base21: parse_importe(args.base21.as_deref()),
        base105: parse_importe(args.base105.as_deref()),
        base27: parse_importe(args.base27.as_deref()),
        exento: parse_importe(args.exento.as_deref()),
        no_gravado: parse_importe(args.no_gravado.as_deref()),
        percep_iva: parse_importe(args.percep_iva.as_deref()),
        percep_iibb: parse_importe(args.percep_iibb.as_deref()),
        municipalidad: parse_importe(args.municipalidad.as_deref()),
        otros: parse_importe(args.otros.as_deref()),
    }
}

fn imprimir_totales(totales: &TotalesComprobante) {
    println!("IVA 21%:   {:>12.2}", totales.iva21);
    println!("IVA 10.5%: {:>12.2}", totales.iva105);
    println!("IVA 27%:   {:>12.2}", totales.iva27);
    println!("IVA total: {:>12.2}", totales.total_iva);
    println!("Subtotal:  {:>12.2}", totales.subtotal);
    println!("Total:     {:>12.2}", totales.total);
}

/// Picks a provider id from the arguments, resolving filter text against the
/// service's provider list.
async fn resolver_proveedor(
    backend: &ClienteRetenciones,
    args: &FacturaArgs,
) -> Result<i64> {
    if let Some(id) = args.proveedor_id {
        return Ok(id);
    }
    let Some(texto) = args.proveedor.as_deref() else {
        bail!("seleccione proveedor (--proveedor-id o --proveedor)");
    };

    let lista = backend.listar_proveedores().await?;
    let coincidencias: Vec<&Proveedor> = filtrar_proveedores(&lista, texto);
    match coincidencias.as_slice() {
        [] => bail!("ningún proveedor coincide con '{texto}'"),
        [unico] => Ok(unico.id),
        varios => {
            for p in varios {
                eprintln!("  {:>5}  {}  {}", p.id, p.cuit, p.razon_social);
            }
            bail!(
                "'{texto}' coincide con {} proveedores; use --proveedor-id",
                varios.len()
            );
        }
    }
}

pub async fn ejecutar(
    backend: &ClienteRetenciones,
    args: &FacturaArgs,
) -> Result<()> {
    let importes = importes_de(args);
    let totales = calc_total(&importes);
    imprimir_totales(&totales);

    if args.solo_calcular {
        return Ok(());
    }

    let proveedor_id = resolver_proveedor(backend, args).await?;
    let alta = NuevoComprobante {
        proveedor_id,
        punto_venta: args.pv.clone().unwrap_or_default(),
        numero: args.nro.clone().unwrap_or_default(),
        fecha: args.fecha.unwrap_or_else(|| Local::now().date_naive()),
        importes,
    };

    let creado = backend.crear_comprobante(&alta).await?;
    if creado.ok {
        println!("Guardado con éxito (comprobante {}).", creado.id);
    } else {
        println!("No se pudo guardar.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn los_importes_aceptan_ambas_convenciones() {
        let args = FacturaArgs {
            base21: Some("1.234,56".to_string()),
            base105: Some("1,234.56".to_string()),
            ..Default::default()
        };

        let importes = importes_de(&args);

        assert_eq!(importes.base21, 1234.56);
        assert_eq!(importes.base105, 1234.56);
        assert_eq!(importes.base27, 0.0);
    }

    #[test]
    fn campos_ausentes_son_cero() {
        let importes = importes_de(&FacturaArgs::default());

        assert_eq!(importes, ImportesComprobante::default());
    }

    #[test]
    fn los_totales_salen_del_nucleo_de_calculo() {
        let args = FacturaArgs {
            base21: Some("100".to_string()),
            ..Default::default()
        };

        let totales = calc_total(&importes_de(&args));

        assert_eq!(totales.iva21, 21.0);
        assert_eq!(totales.total, 121.0);
    }
}
