//! types.rs
//! Modelos de datos compartidos por el servicio: registros tipados de las hojas
//! v1/v2, campo de agrupacion, distribuciones de conteo, vista del mapa
//! y configuracion

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

// Columnas de la hoja v1
pub const COL_NOMBRE_ENTIDAD: &str = "NombreEntidad";
pub const COL_NOMBRE_TIPO_PROCESO: &str = "NombreTipoProceso";
pub const COL_TIPO: &str = "Tipo";
pub const COL_SUB_ESTADO: &str = "SubEstado";
pub const COL_INFORME_DME: &str = "INFORME emitido por la DME";

// Columnas de la hoja v2
pub const COL_LATITUD: &str = "Latitud";
pub const COL_LONGITUD: &str = "Longitud";
pub const COL_TIPO_UBICACION: &str = "tipo";
pub const COL_CFICHAS: &str = "Cfichas";

/// Centroide nacional (Peru) usado cuando no hay entidad seleccionada
pub const CENTRO_NACIONAL: Punto = Punto(-9.189967, -75.015152);
/// Posicion del marcador sin seleccion
pub const MARCADOR_INICIAL: Punto = Punto(0.0, 0.0);
pub const ZOOM_MAPA: f64 = 4.5;

/// Campo por el que se agrupan las barras del grafico.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampoAgrupacion {
    #[default]
    NombreTipoProceso,
    Tipo,
}

impl CampoAgrupacion {
    pub fn columna(self) -> &'static str {
        match self {
            CampoAgrupacion::NombreTipoProceso => COL_NOMBRE_TIPO_PROCESO,
            CampoAgrupacion::Tipo => COL_TIPO,
        }
    }
}

impl fmt::Display for CampoAgrupacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.columna())
    }
}

/// Fila de la hoja v1: un proceso de la entidad con su subestado
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistroProceso {
    pub nombre_entidad: String,
    pub nombre_tipo_proceso: String,
    pub tipo: String,
    pub sub_estado: String,
    pub informe_dme: String,
}

impl RegistroProceso {
    /// Valor de la fila para el campo de agrupacion (vacio si la celda lo esta)
    pub fn valor(&self, campo: CampoAgrupacion) -> &str {
        match campo {
            CampoAgrupacion::NombreTipoProceso => &self.nombre_tipo_proceso,
            CampoAgrupacion::Tipo => &self.tipo,
        }
    }
}

/// Fila de la hoja v2. Latitud/Longitud quedan como texto hasta que se pide
/// la ubicacion de la entidad.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistroUbicacion {
    pub nombre_entidad: String,
    pub latitud: String,
    pub longitud: String,
    pub tipo: String,
    pub cfichas: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Conteo {
    pub etiqueta: String,
    pub cantidad: usize,
}

/// Distribucion etiqueta -> cantidad, ordenada por cantidad descendente
/// (empates por etiqueta).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Distribucion {
    entradas: Vec<Conteo>,
}

impl Distribucion {
    pub fn desde_conteos<K: Into<String>>(conteos: impl IntoIterator<Item = (K, usize)>) -> Self {
        let mut entradas: Vec<Conteo> = conteos
            .into_iter()
            .map(|(k, n)| Conteo { etiqueta: k.into(), cantidad: n })
            .collect();
        entradas.sort_by(|a, b| b.cantidad.cmp(&a.cantidad).then_with(|| a.etiqueta.cmp(&b.etiqueta)));
        Self { entradas }
    }

    /// Cuenta cada valor de la secuencia
    pub fn contar<'a>(valores: impl IntoIterator<Item = &'a str>) -> Self {
        let mut map: HashMap<&str, usize> = HashMap::new();
        for v in valores {
            *map.entry(v).or_insert(0) += 1;
        }
        Self::desde_conteos(map)
    }

    pub fn get(&self, etiqueta: &str) -> Option<usize> {
        self.entradas.iter().find(|c| c.etiqueta == etiqueta).map(|c| c.cantidad)
    }

    pub fn total(&self) -> usize {
        self.entradas.iter().map(|c| c.cantidad).sum()
    }

    pub fn len(&self) -> usize { self.entradas.len() }

    pub fn is_empty(&self) -> bool { self.entradas.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Conteo> { self.entradas.iter() }

    pub fn etiquetas(&self) -> Vec<&str> {
        self.entradas.iter().map(|c| c.etiqueta.as_str()).collect()
    }

    pub fn cantidades(&self) -> Vec<usize> {
        self.entradas.iter().map(|c| c.cantidad).collect()
    }
}

/// Par (lat, lon) en grados. Se serializa como `[lat, lon]`, el formato de Leaflet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Punto(pub f64, pub f64);

/// Resultado de ubicar una entidad: centro del mapa, marcador y tooltip.
/// Con entidad encontrada, centro y marcador salen del mismo par.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ubicacion {
    pub centro: Punto,
    pub marcador: Punto,
    pub tooltip: String,
}

impl Ubicacion {
    pub fn en(punto: Punto, tooltip: String) -> Self {
        Self { centro: punto, marcador: punto, tooltip }
    }

    pub fn por_defecto() -> Self {
        Self { centro: CENTRO_NACIONAL, marcador: MARCADOR_INICIAL, tooltip: String::new() }
    }
}

#[derive(Clone, Debug)]
pub struct AppCfg {
    /// Dirección/puerto del servidor HTTP (Axum)
    pub bind: String,

    /// JSON de la cuenta de servicio de Google
    pub credenciales: String,

    /// ID del documento de Google Sheets
    pub spreadsheet_id: String,

    pub hoja_v1: String,
    pub hoja_v2: String,

    /// Carpeta con la pagina estatica del tablero
    pub web_dir: String,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8050".into(),
            credenciales: "google_credentials.json".into(),
            spreadsheet_id: "1q2U_TtqR_ohBFenYr6Iq3ADS_lFTNpD8x9qnQO4ROuE".into(),
            hoja_v1: "v1".into(),
            hoja_v2: "v2".into(),
            web_dir: "web".into(),
        }
    }
}

impl AppCfg {
    pub fn desde_env() -> Self {
        Self::desde_lookup(|k| std::env::var(k).ok())
    }

    /// Parte de los valores por defecto y pisa los que devuelva `lookup`
    pub fn desde_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut c = AppCfg::default();
        if let Some(v) = lookup("BIND") { c.bind = v; }
        if let Some(v) = lookup("GOOGLE_CREDENTIALS") { c.credenciales = v; }
        if let Some(v) = lookup("SPREADSHEET_ID") { c.spreadsheet_id = v; }
        if let Some(v) = lookup("HOJA_V1") { c.hoja_v1 = v; }
        if let Some(v) = lookup("HOJA_V2") { c.hoja_v2 = v; }
        if let Some(v) = lookup("WEB_DIR") { c.web_dir = v; }
        c
    }
}
