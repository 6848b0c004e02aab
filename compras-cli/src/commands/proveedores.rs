//! `proveedores`: listing, search and CRUD over the provider registry.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use compras_api::ClienteRetenciones;
use compras_core::ComprasBackend;
use compras_core::cuit::cuit_valido;
use compras_core::models::{
    CondicionFiscal, NuevoProveedor, Proveedor, filtrar_proveedores,
};

use crate::tabla::tabla_proveedores;

#[derive(Debug, Subcommand)]
pub enum AccionProveedores {
    /// Lista los proveedores, con filtro local opcional.
    Listar {
        /// Texto a buscar en razón social, CUIT o dirección.
        #[arg(long, default_value = "")]
        filtro: String,
    },

    /// Búsqueda en el servicio (para registros que aún no están en la lista).
    Buscar { consulta: String },

    /// Alta de proveedor.
    Alta(AltaArgs),

    /// Modificación de un proveedor existente.
    Modificar(ModificarArgs),
}

#[derive(Debug, Args)]
pub struct AltaArgs {
    #[arg(long)]
    pub razon_social: String,
    #[arg(long)]
    pub cuit: String,
    #[arg(long, default_value = "")]
    pub direccion: String,
    #[arg(long)]
    pub telefono: Option<String>,
    /// Condición fiscal: RI, MT o EX.
    #[arg(long, default_value = "RI")]
    pub condicion_fiscal: String,
    #[arg(long)]
    pub convenio_multilateral: bool,
    #[arg(long)]
    pub exento_iibb: bool,
    #[arg(long)]
    pub exento_municipalidad: bool,
}

#[derive(Debug, Default, Args)]
pub struct ModificarArgs {
    /// Id del proveedor a modificar.
    pub id: i64,

    #[arg(long)]
    pub razon_social: Option<String>,
    #[arg(long)]
    pub cuit: Option<String>,
    #[arg(long)]
    pub direccion: Option<String>,
    #[arg(long)]
    pub telefono: Option<String>,
    /// Condición fiscal: RI, MT o EX.
    #[arg(long)]
    pub condicion_fiscal: Option<String>,
    #[arg(long)]
    pub convenio_multilateral: Option<bool>,
    #[arg(long)]
    pub exento_iibb: Option<bool>,
    #[arg(long)]
    pub exento_municipalidad: Option<bool>,
}

fn parsear_condicion(codigo: &str) -> Result<CondicionFiscal> {
    match CondicionFiscal::parse(codigo) {
        Some(condicion) => Ok(condicion),
        None => bail!("condición fiscal desconocida '{codigo}' (use RI, MT o EX)"),
    }
}

fn avisar_cuit_sospechoso(cuit: &str) {
    if !cuit_valido(cuit) {
        eprintln!("Atención: el CUIT '{cuit}' no supera la verificación; se envía igual.");
    }
}

/// Merges the edit flags over the provider's current state.
pub fn aplicar_cambios(
    actual: &Proveedor,
    args: &ModificarArgs,
) -> Result<NuevoProveedor> {
    let condicion_fiscal = match &args.condicion_fiscal {
        Some(codigo) => parsear_condicion(codigo)?,
        None => actual.condicion_fiscal,
    };

    Ok(NuevoProveedor {
        cuit: args.cuit.clone().unwrap_or_else(|| actual.cuit.clone()),
        razon_social: args
            .razon_social
            .clone()
            .unwrap_or_else(|| actual.razon_social.clone()),
        direccion: args
            .direccion
            .clone()
            .unwrap_or_else(|| actual.direccion.clone()),
        telefono: args.telefono.clone().or_else(|| actual.telefono.clone()),
        condicion_fiscal,
        convenio_multilateral: args
            .convenio_multilateral
            .unwrap_or(actual.convenio_multilateral),
        exento_iibb: args.exento_iibb.unwrap_or(actual.exento_iibb),
        exento_municipalidad: args
            .exento_municipalidad
            .unwrap_or(actual.exento_municipalidad),
    })
}

pub async fn ejecutar(
    backend: &ClienteRetenciones,
    accion: &AccionProveedores,
) -> Result<()> {
    match accion {
        AccionProveedores::Listar { filtro } => {
            let lista = backend.listar_proveedores().await?;
            let visibles = filtrar_proveedores(&lista, filtro);
            print!("{}", tabla_proveedores(&visibles));
            println!("{} proveedores.", visibles.len());
        }

        AccionProveedores::Buscar { consulta } => {
            let lista = backend.buscar_proveedores(consulta).await?;
            let refs: Vec<&Proveedor> = lista.iter().collect();
            print!("{}", tabla_proveedores(&refs));
            println!("{} proveedores.", refs.len());
        }

        AccionProveedores::Alta(args) => {
            avisar_cuit_sospechoso(&args.cuit);
            let alta = NuevoProveedor {
                cuit: args.cuit.clone(),
                razon_social: args.razon_social.clone(),
                direccion: args.direccion.clone(),
                telefono: args.telefono.clone(),
                condicion_fiscal: parsear_condicion(&args.condicion_fiscal)?,
                convenio_multilateral: args.convenio_multilateral,
                exento_iibb: args.exento_iibb,
                exento_municipalidad: args.exento_municipalidad,
            };
            let creado = backend.crear_proveedor(&alta).await?;
            println!("Proveedor creado con id {}.", creado.id);
        }

        AccionProveedores::Modificar(args) => {
            let lista = backend.listar_proveedores().await?;
            let Some(actual) = lista.iter().find(|p| p.id == args.id) else {
                bail!("no existe un proveedor con id {}", args.id);
            };
            let cambios = aplicar_cambios(actual, args)?;
            avisar_cuit_sospechoso(&cambios.cuit);
            let actualizado = backend.actualizar_proveedor(args.id, &cambios).await?;
            println!("Proveedor {} actualizado.", actualizado.id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn actual() -> Proveedor {
        Proveedor {
            id: 7,
            cuit: "30-71234567-1".to_string(),
            razon_social: "Papelera Norte".to_string(),
            direccion: "Mitre 450".to_string(),
            telefono: Some("341-5550000".to_string()),
            condicion_fiscal: CondicionFiscal::ResponsableInscripto,
            convenio_multilateral: false,
            exento_iibb: false,
            exento_municipalidad: true,
        }
    }

    #[test]
    fn sin_banderas_conserva_todo() {
        let args = ModificarArgs {
            id: 7,
            ..Default::default()
        };

        let cambios = aplicar_cambios(&actual(), &args).expect("merge");

        assert_eq!(cambios.razon_social, "Papelera Norte");
        assert_eq!(cambios.cuit, "30-71234567-1");
        assert_eq!(cambios.telefono.as_deref(), Some("341-5550000"));
        assert_eq!(
            cambios.condicion_fiscal,
            CondicionFiscal::ResponsableInscripto
        );
        assert!(cambios.exento_municipalidad);
    }

    #[test]
    fn cada_bandera_pisa_su_campo() {
        let args = ModificarArgs {
            id: 7,
            razon_social: Some("Papelera Sur".to_string()),
            condicion_fiscal: Some("MT".to_string()),
            convenio_multilateral: Some(true),
            exento_municipalidad: Some(false),
            ..Default::default()
        };

        let cambios = aplicar_cambios(&actual(), &args).expect("merge");

        assert_eq!(cambios.razon_social, "Papelera Sur");
        assert_eq!(cambios.condicion_fiscal, CondicionFiscal::Monotributo);
        assert!(cambios.convenio_multilateral);
        assert!(!cambios.exento_municipalidad);
        // Untouched fields survive.
        assert_eq!(cambios.cuit, "30-71234567-1");
    }

    #[test]
    fn condicion_desconocida_es_error() {
        let args = ModificarArgs {
            id: 7,
            condicion_fiscal: Some("ZZ".to_string()),
            ..Default::default()
        };

        assert!(aplicar_cambios(&actual(), &args).is_err());
    }
}
