//! fetch.rs
//! Descarga de hojas de calculo: valores de Google Sheets (API v4) como grilla de texto.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::HashMap;

pub const SHEETS_BASE: &str = "https://sheets.googleapis.com";

/// Fuente de hojas: devuelve la hoja completa, cabecera incluida
#[async_trait]
pub trait FuenteHojas: Send + Sync {
    async fn obtener(&self, hoja: &str) -> Result<Vec<Vec<String>>>;
}

pub struct GoogleSheets {
    http: Client,
    token: String,
    spreadsheet_id: String,
    base: String,
}

impl GoogleSheets {
    pub fn new(http: Client, token: String, spreadsheet_id: String) -> Self {
        Self { http, token, spreadsheet_id, base: SHEETS_BASE.into() }
    }

    pub fn url_valores(&self, hoja: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("URL base sin path: {}", self.base))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", hoja]);
        url.query_pairs_mut()
            .append_pair("majorDimension", "ROWS")
            .append_pair("valueRenderOption", "FORMATTED_VALUE");
        Ok(url)
    }
}

#[derive(Deserialize)]
struct RangoValores {
    // Sheets omite `values` si la hoja esta vacia
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[async_trait]
impl FuenteHojas for GoogleSheets {
    async fn obtener(&self, hoja: &str) -> Result<Vec<Vec<String>>> {
        let url = self.url_valores(hoja)?;
        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let cuerpo = resp.text().await.unwrap_or_default();
            bail!("HTTP {} al leer la hoja {}: {}", status, hoja, cuerpo);
        }
        let rango: RangoValores = resp.json().await?;
        Ok(rango.values)
    }
}

/// Hojas en memoria, por nombre
#[derive(Clone, Default)]
pub struct FuenteMemoria {
    hojas: HashMap<String, Vec<Vec<String>>>,
}

impl FuenteMemoria {
    pub fn con_hoja(mut self, nombre: &str, grilla: Vec<Vec<String>>) -> Self {
        self.hojas.insert(nombre.to_string(), grilla);
        self
    }
}

#[async_trait]
impl FuenteHojas for FuenteMemoria {
    async fn obtener(&self, hoja: &str) -> Result<Vec<Vec<String>>> {
        self.hojas
            .get(hoja)
            .cloned()
            .ok_or_else(|| anyhow!("la hoja {hoja} no existe"))
    }
}
