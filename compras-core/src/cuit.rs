//! CUIT normalization and check-digit verification.
//!
//! The accounting service owns real validation; this is only used to warn
//! the operator before a suspicious CUIT leaves the entry form.

use std::sync::OnceLock;

use regex::Regex;

static FORMATO: OnceLock<Regex> = OnceLock::new();

fn formato() -> &'static Regex {
    FORMATO.get_or_init(|| Regex::new(r"^\d{2}-?\d{8}-?\d$").expect("static pattern"))
}

/// Weights applied to the first ten digits when computing the check digit.
const PESOS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Strips everything that is not a digit: `"20-12345678-6"` → `"20123456786"`.
pub fn normalizar_cuit(cuit: &str) -> String {
    cuit.chars().filter(char::is_ascii_digit).collect()
}

/// Whether the string looks like a CUIT at all: eleven digits, optionally
/// with the two customary dashes.
pub fn formato_cuit_valido(cuit: &str) -> bool {
    formato().is_match(cuit.trim())
}

/// Verifies the mod-11 check digit of a CUIT.
///
/// Remainder 1 would call for check digit 10, which does not exist; the
/// lenient convention used here (and by most entry-form validators) accepts
/// 9 in that position instead of rejecting outright.
pub fn cuit_valido(cuit: &str) -> bool {
    let digitos = normalizar_cuit(cuit);
    if digitos.len() != 11 {
        return false;
    }

    let valores: Vec<u32> = digitos.chars().filter_map(|c| c.to_digit(10)).collect();
    let suma: u32 = valores[..10]
        .iter()
        .zip(PESOS)
        .map(|(d, p)| d * p)
        .sum();

    let esperado = match 11 - (suma % 11) {
        11 => 0,
        10 => 9,
        dv => dv,
    };

    valores[10] == esperado
}

/// Renders an 11-digit CUIT with the customary dashes. Anything that is not
/// eleven digits after normalization comes back unchanged.
pub fn formatear_cuit(cuit: &str) -> String {
    let digitos = normalizar_cuit(cuit);
    if digitos.len() != 11 {
        return cuit.to_string();
    }
    format!("{}-{}-{}", &digitos[..2], &digitos[2..10], &digitos[10..])
}
