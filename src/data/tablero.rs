//! tablero.rs
//! Contexto inmutable del tablero: registros de v1/v2, lista de entidades y
//! conteo de informes. Se construye una vez al arrancar y se comparte con `Arc`.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::data::agregacion::{self, Agregado};
use crate::data::tabla::TablaCruda;
use crate::data::ubicacion;
use crate::models::error::TableroError;
use crate::models::types::{CampoAgrupacion, Distribucion, RegistroProceso, RegistroUbicacion, Ubicacion};
use crate::server::fetch::FuenteHojas;

#[derive(Clone, Debug, Serialize)]
pub struct Kpis {
    pub filas_v1: usize,
    pub filas_v2: usize,
    pub entidades: usize,
    pub entidades_sin_ubicacion: usize,
    pub cargado_utc: String,
}

#[derive(Debug)]
pub struct Tablero {
    procesos: Vec<RegistroProceso>,
    ubicaciones: Vec<RegistroUbicacion>,
    entidades: Vec<String>,
    informes: Distribucion,
    kpis: Kpis,
}

impl Tablero {
    pub fn construir(v1: &TablaCruda, v2: &TablaCruda) -> Result<Self, TableroError> {
        let procesos = v1.registros_proceso()?;
        let ubicaciones = v2.registros_ubicacion()?;

        // Entidades distintas de v1, en orden de aparicion. Un nombre vacio no
        // es seleccionable: en el desplegable y en el query equivale a "sin seleccion"
        let mut vistas = HashSet::new();
        let entidades: Vec<String> = procesos
            .iter()
            .filter(|r| !r.nombre_entidad.is_empty())
            .filter(|r| vistas.insert(r.nombre_entidad.as_str()))
            .map(|r| r.nombre_entidad.clone())
            .collect();

        let con_ubicacion: HashSet<&str> = ubicaciones.iter().map(|r| r.nombre_entidad.as_str()).collect();
        let entidades_sin_ubicacion = entidades.iter().filter(|e| !con_ubicacion.contains(e.as_str())).count();

        let informes = agregacion::conteo_informes(&procesos);
        let kpis = Kpis {
            filas_v1: procesos.len(),
            filas_v2: ubicaciones.len(),
            entidades: entidades.len(),
            entidades_sin_ubicacion,
            cargado_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };

        Ok(Self { procesos, ubicaciones, entidades, informes, kpis })
    }

    pub fn agregar(&self, campo: CampoAgrupacion, entidad: Option<&str>) -> Agregado {
        agregacion::agregar(&self.procesos, campo, entidad)
    }

    pub fn ubicar(&self, entidad: Option<&str>) -> Result<Ubicacion, TableroError> {
        ubicacion::ubicar(&self.ubicaciones, entidad)
    }

    pub fn entidades(&self) -> &[String] { &self.entidades }

    pub fn informes(&self) -> &Distribucion { &self.informes }

    pub fn kpis(&self) -> &Kpis { &self.kpis }
}

/// Descarga v1 y v2 de la fuente y arma el tablero. Cualquier fallo aqui es fatal.
pub async fn cargar(fuente: &dyn FuenteHojas, hoja_v1: &str, hoja_v2: &str) -> Result<Tablero> {
    info!("Cargando hoja {hoja_v1}");
    let grilla_v1 = fuente.obtener(hoja_v1).await.with_context(|| format!("descarga de la hoja {hoja_v1}"))?;
    info!("Cargando hoja {hoja_v2}");
    let grilla_v2 = fuente.obtener(hoja_v2).await.with_context(|| format!("descarga de la hoja {hoja_v2}"))?;

    let v1 = TablaCruda::desde_grilla(hoja_v1, grilla_v1)?;
    let v2 = TablaCruda::desde_grilla(hoja_v2, grilla_v2)?;
    let tablero = Tablero::construir(&v1, &v2)?;

    let k = tablero.kpis();
    info!(filas_v1 = k.filas_v1, filas_v2 = k.filas_v2, entidades = k.entidades, "Tablero cargado");
    if k.entidades_sin_ubicacion > 0 {
        warn!("{} entidades de {hoja_v1} sin fila en {hoja_v2}; el mapa usará la vista nacional", k.entidades_sin_ubicacion);
    }
    Ok(tablero)
}
