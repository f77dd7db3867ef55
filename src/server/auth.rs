//! auth.rs
//!
//! Autenticacion con cuenta de servicio de Google (OAuth 2.0 JWT bearer).
//!
//! - Lee el JSON de la cuenta de servicio (`client_email`, `private_key`, `token_uri`).
//! - Firma una afirmacion RS256 con los scopes de Sheets y Drive.
//! - La canjea por un `access_token` que se usa durante la carga inicial.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::error::TableroError;

pub const SCOPES: &[&str] = &[
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const VIDA_TOKEN_S: i64 = 3600;

fn token_uri_por_defecto() -> String {
    "https://oauth2.googleapis.com/token".into()
}

#[derive(Clone, Deserialize)]
pub struct Credenciales {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "token_uri_por_defecto")]
    pub token_uri: String,
}

// La clave privada no sale en logs
impl std::fmt::Debug for Credenciales {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credenciales")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, PartialEq)]
struct Reclamos<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct RespuestaToken {
    access_token: String,
}

impl Credenciales {
    pub fn desde_archivo(ruta: impl AsRef<Path>) -> Result<Self, TableroError> {
        let ruta = ruta.as_ref();
        let texto = std::fs::read_to_string(ruta).map_err(|e| TableroError::Credenciales {
            ruta: ruta.display().to_string(),
            motivo: e.to_string(),
        })?;
        Self::desde_json(&texto, &ruta.display().to_string())
    }

    pub fn desde_json(texto: &str, origen: &str) -> Result<Self, TableroError> {
        serde_json::from_str(texto).map_err(|e| TableroError::Credenciales {
            ruta: origen.to_string(),
            motivo: e.to_string(),
        })
    }

    fn reclamos(&self, scopes: &[&str], ahora: i64) -> Reclamos<'_> {
        Reclamos {
            iss: &self.client_email,
            scope: scopes.join(" "),
            aud: &self.token_uri,
            iat: ahora,
            exp: ahora + VIDA_TOKEN_S,
        }
    }

    fn afirmacion(&self, scopes: &[&str], ahora: i64) -> Result<String> {
        let clave = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .context("private_key no es una clave RSA PEM")?;
        let jwt = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &self.reclamos(scopes, ahora), &clave)?;
        Ok(jwt)
    }
}

pub async fn obtener_token(client: &Client, cred: &Credenciales, scopes: &[&str]) -> Result<String> {
    let assertion = cred.afirmacion(scopes, Utc::now().timestamp())?;
    let resp = client
        .post(&cred.token_uri)
        .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
        .send()
        .await?;
    let status = resp.status();
    if !status.is_success() {
        let cuerpo = resp.text().await.unwrap_or_default();
        bail!("token OAuth rechazado (HTTP {}): {}", status, cuerpo);
    }
    let tok: RespuestaToken = resp.json().await?;
    Ok(tok.access_token)
}
