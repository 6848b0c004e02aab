use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use compras_cli::commands::{self, factura, informes, proveedores, sesion};
use compras_cli::config;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Carga de facturas de compra, proveedores e informes contra el servicio
/// de retenciones.
#[derive(Debug, Parser)]
#[command(name = "compras", version)]
struct Cli {
    /// Archivo de configuración (por defecto, config.toml en el directorio
    /// de configuración).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// URL base del servicio; pisa archivo y entorno.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    comando: Comando,
}

#[derive(Debug, Subcommand)]
enum Comando {
    /// Inicia sesión y guarda el token local.
    Login(sesion::LoginArgs),

    /// Descarta la sesión local.
    Logout,

    /// Carga rápida de factura, con vista previa del IVA y el total.
    Factura(factura::FacturaArgs),

    /// Gestión de proveedores.
    Proveedores {
        #[command(subcommand)]
        accion: proveedores::AccionProveedores,
    },

    /// Informe de compras por rango de fechas, con exportación CSV.
    Informes(informes::InformesArgs),
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let ruta_config = cli
        .config
        .clone()
        .unwrap_or_else(|| config::directorio_config().join("config.toml"));
    let archivo = config::cargar_archivo(&ruta_config)?;
    let (env_base, env_timeout) = config::overrides_de_entorno();
    let cliente_config = config::resolver(
        cli.base_url.as_deref(),
        env_base.as_deref(),
        env_timeout,
        &archivo,
    )?;
    debug!(base_url = %cliente_config.base_url, "configuración resuelta");

    let backend = commands::construir_backend(&cliente_config)?;

    match &cli.comando {
        Comando::Login(args) => sesion::login(&backend, args).await,
        Comando::Logout => sesion::logout(&backend),
        Comando::Factura(args) => factura::ejecutar(&backend, args).await,
        Comando::Proveedores { accion } => proveedores::ejecutar(&backend, accion).await,
        Comando::Informes(args) => informes::ejecutar(&backend, args).await,
    }
}
