//! `login` / `logout`.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use compras_api::ClienteRetenciones;
use compras_core::ComprasBackend;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Usuario del servicio.
    pub usuario: String,

    /// Clave; si se omite se lee de la entrada estándar.
    #[arg(long)]
    pub clave: Option<String>,
}

pub async fn login(
    backend: &ClienteRetenciones,
    args: &LoginArgs,
) -> Result<()> {
    let clave = match &args.clave {
        Some(clave) => clave.clone(),
        None => leer_clave()?,
    };

    backend.login(&args.usuario, &clave).await?;
    println!("Sesión iniciada.");
    Ok(())
}

pub fn logout(backend: &ClienteRetenciones) -> Result<()> {
    backend.sesion().limpiar()?;
    println!("Sesión cerrada.");
    Ok(())
}

fn leer_clave() -> Result<String> {
    print!("Clave: ");
    io::stdout().flush().context("no se pudo escribir en la terminal")?;
    let mut linea = String::new();
    io::stdin()
        .lock()
        .read_line(&mut linea)
        .context("no se pudo leer la clave")?;
    Ok(linea.trim_end_matches(['\r', '\n']).to_string())
}
