use serde::{Deserialize, Serialize};

/// Fiscal condition of a provider, as the accounting service encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CondicionFiscal {
    ResponsableInscripto,
    Monotributo,
    Exento,
}

impl CondicionFiscal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResponsableInscripto => "RI",
            Self::Monotributo => "MT",
            Self::Exento => "EX",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RI" => Some(Self::ResponsableInscripto),
            "MT" => Some(Self::Monotributo),
            "EX" => Some(Self::Exento),
            _ => None,
        }
    }
}

impl Default for CondicionFiscal {
    fn default() -> Self {
        Self::ResponsableInscripto
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proveedor {
    pub id: i64,
    pub cuit: String,
    pub razon_social: String,
    pub direccion: String,
    pub telefono: Option<String>,
    pub condicion_fiscal: CondicionFiscal,
    /// Enrolled in the Convenio Multilateral IIBB regime.
    pub convenio_multilateral: bool,
    pub exento_iibb: bool,
    pub exento_municipalidad: bool,
}

/// For creating or updating providers (no id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevoProveedor {
    pub cuit: String,
    pub razon_social: String,
    pub direccion: String,
    pub telefono: Option<String>,
    pub condicion_fiscal: CondicionFiscal,
    pub convenio_multilateral: bool,
    pub exento_iibb: bool,
    pub exento_municipalidad: bool,
}

impl Proveedor {
    /// Case-insensitive substring match over razón social, CUIT and address.
    pub fn coincide(&self, filtro: &str) -> bool {
        let f = filtro.to_lowercase();
        self.razon_social.to_lowercase().contains(&f)
            || self.cuit.to_lowercase().contains(&f)
            || self.direccion.to_lowercase().contains(&f)
    }
}

/// Client-side provider filtering, as used by the provider list and the
/// invoice-entry autocomplete. An empty filter matches everything.
pub fn filtrar_proveedores<'a>(
    proveedores: &'a [Proveedor],
    filtro: &str,
) -> Vec<&'a Proveedor> {
    proveedores.iter().filter(|p| p.coincide(filtro)).collect()
}
