//! Tolerant parsing of user-typed monetary amounts.
//!
//! Operators paste amounts in whichever convention their source document
//! uses: es-AR (`1.234,56`) or en-US (`1,234.56`). There is no locale flag
//! to consult, so the decimal marker is inferred *positionally* — whichever
//! of `,` / `.` occurs last is taken as the decimal separator, and when only
//! commas appear the comma wins. This is a convention, not a general
//! solution; do not replace it with a locale-aware parser, because strings
//! with a single separator type must keep resolving exactly this way.

/// Passes a finite amount through unchanged; any non-finite value becomes 0.
pub fn importe_or_zero(valor: f64) -> f64 {
    if valor.is_finite() { valor } else { 0.0 }
}

/// Parses a user-typed amount into an `f64`.
///
/// Never fails: `None`, empty input and anything that does not survive
/// normalization all yield `0.0`, so a half-typed form field never blocks
/// recomputation. The result is always finite.
///
/// ```
/// use compras_core::calculations::parse_importe;
///
/// assert_eq!(parse_importe(Some("1.234,56")), 1234.56);
/// assert_eq!(parse_importe(Some("1,234.56")), 1234.56);
/// assert_eq!(parse_importe(Some("abc")), 0.0);
/// assert_eq!(parse_importe(None), 0.0);
/// ```
pub fn parse_importe(input: Option<&str>) -> f64 {
    let Some(s) = input else {
        return 0.0;
    };
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    let ultima_coma = s.rfind(',');
    let ultimo_punto = s.rfind('.');

    let normalizado = match (ultima_coma, ultimo_punto) {
        // Comma after period, or only commas: comma is the decimal marker.
        (Some(c), Some(p)) if c > p => con_coma_decimal(s),
        (Some(_), None) => con_coma_decimal(s),
        // Period after comma, only periods, or neither: strip grouping
        // commas and let the period (if any) stand as the decimal marker.
        _ => s.chars().filter(|&ch| ch != ',').collect(),
    };

    match normalizado.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => {
            tracing::debug!(input = %s, "importe no interpretable, se toma 0");
            0.0
        }
    }
}

/// Comma-decimal normalization: periods are thousands grouping and are
/// dropped; the last comma becomes the decimal point; any earlier comma is
/// grouping and is dropped too.
fn con_coma_decimal(s: &str) -> String {
    let sin_puntos: String = s.chars().filter(|&ch| ch != '.').collect();
    let ultima = sin_puntos.rfind(',');
    sin_puntos
        .char_indices()
        .filter_map(|(i, ch)| match ch {
            ',' if Some(i) == ultima => Some('.'),
            ',' => None,
            otro => Some(otro),
        })
        .collect()
}
