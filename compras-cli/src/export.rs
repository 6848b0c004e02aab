//! CSV export of the purchases report.
//!
//! Files are prefixed with a UTF-8 BOM so that spreadsheet software opening
//! them by double-click picks the right encoding — same trick the previous
//! web version used for its downloads.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use compras_core::report::FilaInforme;

const BOM: &[u8] = "\u{feff}".as_bytes();

/// Writes the report rows as CSV. Returns `false` (and writes nothing) when
/// there are no rows.
pub fn exportar_csv(
    path: &Path,
    filas: &[FilaInforme],
) -> Result<bool> {
    if filas.is_empty() {
        return Ok(false);
    }

    let mut archivo =
        File::create(path).with_context(|| format!("no se pudo crear '{}'", path.display()))?;
    archivo.write_all(BOM).context("no se pudo escribir el BOM")?;

    let mut escritor = csv::Writer::from_writer(archivo);
    for fila in filas {
        escritor
            .serialize(fila)
            .context("no se pudo serializar una fila del informe")?;
    }
    escritor.flush().context("no se pudo terminar de escribir el CSV")?;

    Ok(true)
}

/// Default export file name for a date range, e.g.
/// `informes-2026-08-01-al-2026-08-31.csv`.
pub fn nombre_por_defecto(
    desde: chrono::NaiveDate,
    hasta: chrono::NaiveDate,
) -> String {
    format!(
        "informes-{}-al-{}.csv",
        desde.format("%Y-%m-%d"),
        hasta.format("%Y-%m-%d")
    )
}
