//! File-backed session token storage.
//!
//! The web predecessor of this tool kept the login token in browser local
//! storage; here it lives in a plain file under the user's config
//! directory. The same garbage-token hygiene applies: blank values and the
//! literal strings `"undefined"` / `"null"` (which a buggy writer once
//! produced) are treated as no session at all.

use std::fs;
use std::path::{Path, PathBuf};

use compras_core::ApiError;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Conventional store location inside a config directory.
    pub fn en_directorio(dir: &Path) -> Self {
        Self::new(dir.join("session.token"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored token, if there is a usable one.
    pub fn token(&self) -> Option<String> {
        let crudo = fs::read_to_string(&self.path).ok()?;
        let token = crudo.trim();
        if token.is_empty() || token == "undefined" || token == "null" {
            return None;
        }
        Some(token.to_string())
    }

    pub fn guardar(
        &self,
        token: &str,
    ) -> Result<(), ApiError> {
        if let Some(padre) = self.path.parent() {
            fs::create_dir_all(padre).map_err(|e| ApiError::Session(e.to_string()))?;
        }
        fs::write(&self.path, token).map_err(|e| ApiError::Session(e.to_string()))?;
        debug!(path = %self.path.display(), "token de sesión guardado");
        Ok(())
    }

    /// Removes the stored token. Missing file is not an error.
    pub fn limpiar(&self) -> Result<(), ApiError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Session(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn store_temporal(nombre: &str) -> SessionStore {
        let dir = std::env::temp_dir()
            .join(format!("compras-session-tests-{}", std::process::id()));
        SessionStore::new(dir.join(format!("{nombre}.token")))
    }

    #[test]
    fn guardar_y_leer_round_trip() {
        let store = store_temporal("round_trip");

        store.guardar("abc123").expect("write");

        assert_eq!(store.token(), Some("abc123".to_string()));
        store.limpiar().expect("cleanup");
    }

    #[test]
    fn token_ausente_es_none() {
        let store = store_temporal("ausente");
        store.limpiar().expect("ensure missing");

        assert_eq!(store.token(), None);
    }

    #[test]
    fn valores_basura_se_descartan() {
        for basura in ["", "   ", "undefined", "null"] {
            let store = store_temporal("basura");
            store.guardar(basura).expect("write");

            assert_eq!(store.token(), None, "stored {basura:?}");
            store.limpiar().expect("cleanup");
        }
    }

    #[test]
    fn token_se_recorta() {
        let store = store_temporal("recorte");
        store.guardar("  tok  \n").expect("write");

        assert_eq!(store.token(), Some("tok".to_string()));
        store.limpiar().expect("cleanup");
    }

    #[test]
    fn limpiar_dos_veces_no_falla() {
        let store = store_temporal("doble_limpieza");
        store.guardar("x").expect("write");

        store.limpiar().expect("first");
        store.limpiar().expect("second");

        assert_eq!(store.token(), None);
    }
}
