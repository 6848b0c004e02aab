//! `informes`: purchases report over a date range, with CSV export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Months, NaiveDate};
use clap::Args;
use compras_api::ClienteRetenciones;
use compras_core::ComprasBackend;
use compras_core::currency::format_ars;
use compras_core::models::FiltroComprobantes;
use compras_core::report::{construir_filas, resumen};

use crate::export::{exportar_csv, nombre_por_defecto};
use crate::tabla::tabla_informe;

#[derive(Debug, Default, Args)]
pub struct InformesArgs {
    /// Inicio del rango; por defecto, el primer día del mes en curso.
    #[arg(long)]
    pub desde: Option<NaiveDate>,

    /// Fin del rango; por defecto, el último día del mes en curso.
    #[arg(long)]
    pub hasta: Option<NaiveDate>,

    /// Restringe el informe a un proveedor.
    #[arg(long)]
    pub proveedor_id: Option<i64>,

    /// Exporta el informe como CSV (con BOM). Sin valor usa un nombre
    /// derivado del rango.
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub csv: Option<PathBuf>,
}

/// First and last day of the month `hoy` falls in.
pub fn rango_mes(hoy: NaiveDate) -> (NaiveDate, NaiveDate) {
    let primero = hoy.with_day(1).unwrap_or(hoy);
    let ultimo = primero
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(hoy);
    (primero, ultimo)
}

pub async fn ejecutar(
    backend: &ClienteRetenciones,
    args: &InformesArgs,
) -> Result<()> {
    let (primero, ultimo) = rango_mes(Local::now().date_naive());
    let filtro = FiltroComprobantes {
        desde: args.desde.unwrap_or(primero),
        hasta: args.hasta.unwrap_or(ultimo),
        proveedor_id: args.proveedor_id,
    };

    let comprobantes = backend.listar_comprobantes(&filtro).await?;
    let filas = construir_filas(&comprobantes);
    let kpis = resumen(&comprobantes);

    println!(
        "Compras del {} al {}{}",
        filtro.desde,
        filtro.hasta,
        match filtro.proveedor_id {
            Some(id) => format!(" (proveedor {id})"),
            None => String::new(),
        }
    );
    println!("Total: {}   IVA: {}", format_ars(kpis.total), format_ars(kpis.iva));
    println!();
    print!("{}", tabla_informe(&filas));
    println!("{} comprobantes.", filas.len());

    if let Some(ruta) = &args.csv {
        let ruta = if ruta.as_os_str().is_empty() {
            PathBuf::from(nombre_por_defecto(filtro.desde, filtro.hasta))
        } else {
            ruta.clone()
        };
        if exportar_csv(&ruta, &filas).context("no se pudo exportar el CSV")? {
            println!("CSV exportado a '{}'.", ruta.display());
        } else {
            println!("Sin filas: no se exportó ningún CSV.");
        }
    }

    Ok(())
}
