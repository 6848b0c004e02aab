//! reqwest implementation of [`ComprasBackend`].

use std::time::Duration;

use async_trait::async_trait;
use compras_core::models::{
    Comprobante, ComprobanteCreado, FiltroComprobantes, NuevoComprobante, NuevoProveedor,
    Proveedor,
};
use compras_core::{ApiError, ComprasBackend};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ClienteConfig;
use crate::session::SessionStore;
use crate::wire::{
    AltaComprobantePayload, CreadoDto, FacturaDto, LoginRequest, ProveedorDto, ProveedorPayload,
    extraer_token,
};

/// HTTP client for the retenciones accounting service.
///
/// Holds the persisted session; any 401 clears it so the next call fails
/// fast with [`ApiError::AuthExpired`] instead of hammering the service.
pub struct ClienteRetenciones {
    http: reqwest::Client,
    base_url: Url,
    sesion: SessionStore,
}

impl ClienteRetenciones {
    pub fn new(
        config: &ClienteConfig,
        sesion: SessionStore,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Http {
                endpoint: "client_init".to_string(),
                detail: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            sesion,
        })
    }

    pub fn sesion(&self) -> &SessionStore {
        &self.sesion
    }

    fn url(
        &self,
        recurso: &str,
    ) -> String {
        format!("{}v1/retenciones/{recurso}", self.base_url)
    }

    /// Request builder with the stored bearer token attached. Fails without
    /// touching the network when there is no session.
    fn autenticado(
        &self,
        req: RequestBuilder,
    ) -> Result<RequestBuilder, ApiError> {
        let token = self.sesion.token().ok_or(ApiError::AuthExpired)?;
        Ok(req.bearer_auth(token))
    }

    /// Sends a request and normalizes the failure modes: transport errors,
    /// 401 (which invalidates the local session) and other non-2xx.
    async fn enviar(
        &self,
        endpoint: &str,
        req: RequestBuilder,
    ) -> Result<Response, ApiError> {
        debug!(endpoint, "llamando al servicio");
        let resp = req.send().await.map_err(|e| ApiError::Http {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            warn!(endpoint, "401 del servicio; se descarta la sesión local");
            self.sesion.limpiar()?;
            return Err(ApiError::AuthExpired);
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        Ok(resp)
    }

    async fn decodificar<T: serde::de::DeserializeOwned>(
        endpoint: &str,
        resp: Response,
    ) -> Result<T, ApiError> {
        resp.json().await.map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })
    }

    /// The service sometimes answers `null` or an object where a list is
    /// expected; anything that is not an array maps to "no results".
    fn lista_tolerante(
        endpoint: &str,
        cuerpo: Value,
    ) -> Result<Vec<ProveedorDto>, ApiError> {
        if !cuerpo.is_array() {
            debug!(endpoint, "respuesta sin listado, se interpreta vacía");
            return Ok(Vec::new());
        }
        serde_json::from_value(cuerpo).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl ComprasBackend for ClienteRetenciones {
    async fn login(
        &self,
        usuario: &str,
        clave: &str,
    ) -> Result<(), ApiError> {
        let endpoint = "POST /users/login";
        let url = self.url("users/login");

        let resp = self
            .http
            .post(&url)
            .json(&LoginRequest {
                username: usuario,
                password: clave,
            })
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detalle = if body.trim().is_empty() {
                "error de autenticación".to_string()
            } else {
                body
            };
            return Err(ApiError::InvalidCredentials(detalle));
        }

        let cuerpo: Value = Self::decodificar(endpoint, resp).await?;
        match extraer_token(&cuerpo) {
            Some(token) => {
                self.sesion.guardar(&token)?;
                info!(usuario, "sesión iniciada");
                Ok(())
            }
            None => {
                // Never leave a stale or garbage token behind.
                self.sesion.limpiar()?;
                Err(ApiError::TokenMissing)
            }
        }
    }

    async fn listar_proveedores(&self) -> Result<Vec<Proveedor>, ApiError> {
        let endpoint = "GET /providers";
        let req = self.autenticado(self.http.get(self.url("providers")))?;
        let resp = self.enviar(endpoint, req).await?;

        let cuerpo: Value = Self::decodificar(endpoint, resp).await?;
        let dtos = Self::lista_tolerante(endpoint, cuerpo)?;
        Ok(dtos.into_iter().map(ProveedorDto::into_domain).collect())
    }

    async fn buscar_proveedores(
        &self,
        consulta: &str,
    ) -> Result<Vec<Proveedor>, ApiError> {
        let endpoint = "GET /providers/search";
        let req = self.autenticado(
            self.http
                .get(self.url("providers/search"))
                .query(&[("q", consulta)]),
        )?;
        let resp = self.enviar(endpoint, req).await?;

        let cuerpo: Value = Self::decodificar(endpoint, resp).await?;
        let dtos = Self::lista_tolerante(endpoint, cuerpo)?;
        Ok(dtos.into_iter().map(ProveedorDto::into_domain).collect())
    }

    async fn crear_proveedor(
        &self,
        alta: &NuevoProveedor,
    ) -> Result<Proveedor, ApiError> {
        let endpoint = "POST /providers";
        let req = self.autenticado(
            self.http
                .post(self.url("providers"))
                .json(&ProveedorPayload::from_domain(alta)),
        )?;
        let resp = self.enviar(endpoint, req).await?;

        let dto: ProveedorDto = Self::decodificar(endpoint, resp).await?;
        Ok(dto.into_domain())
    }

    async fn actualizar_proveedor(
        &self,
        id: i64,
        cambios: &NuevoProveedor,
    ) -> Result<Proveedor, ApiError> {
        let endpoint = "PUT /providers/{id}";
        let req = self.autenticado(
            self.http
                .put(self.url(&format!("providers/{id}")))
                .json(&ProveedorPayload::from_domain(cambios)),
        )?;
        let resp = self.enviar(endpoint, req).await?;

        let dto: ProveedorDto = Self::decodificar(endpoint, resp).await?;
        Ok(dto.into_domain())
    }

    async fn crear_comprobante(
        &self,
        alta: &NuevoComprobante,
    ) -> Result<ComprobanteCreado, ApiError> {
        let endpoint = "POST /invoice";
        let req = self.autenticado(
            self.http
                .post(self.url("invoice"))
                .json(&AltaComprobantePayload::from_domain(alta)),
        )?;
        let resp = self.enviar(endpoint, req).await?;

        let dto: CreadoDto = Self::decodificar(endpoint, resp).await?;
        Ok(dto.into_domain())
    }

    async fn listar_comprobantes(
        &self,
        filtro: &FiltroComprobantes,
    ) -> Result<Vec<Comprobante>, ApiError> {
        let endpoint = "GET /invoice";
        let mut consulta: Vec<(&str, String)> = vec![
            ("startDate", filtro.desde.format("%Y-%m-%d").to_string()),
            ("endDate", filtro.hasta.format("%Y-%m-%d").to_string()),
            // Impacted invoices already hit the ledger; this tool only
            // manages pending ones.
            ("impacted", "false".to_string()),
        ];
        if let Some(id) = filtro.proveedor_id {
            consulta.push(("idProvider", id.to_string()));
        }

        let req = self.autenticado(self.http.get(self.url("invoice")).query(&consulta))?;
        let resp = self.enviar(endpoint, req).await?;

        let cuerpo: Value = Self::decodificar(endpoint, resp).await?;
        if !cuerpo.is_array() {
            debug!(endpoint, "respuesta sin listado, se interpreta vacía");
            return Ok(Vec::new());
        }
        let dtos: Vec<FacturaDto> =
            serde_json::from_value(cuerpo).map_err(|e| ApiError::Decode {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            })?;
        Ok(dtos.into_iter().map(FacturaDto::into_domain).collect())
    }
}
