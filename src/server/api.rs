//! api.rs
//! Rutas HTTP: /health, /entidades, /grafico, /mapa, /informes y /kpis.
//! Lo demas se sirve desde la carpeta de la pagina estatica.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir};
use tracing::warn;

use crate::data::tablero::Tablero;
use crate::models::types::{CampoAgrupacion, Distribucion, Punto, Ubicacion, ZOOM_MAPA};
use crate::server::figura::figura_barras;

#[derive(Clone)]
pub struct ApiState {
    pub tablero: Arc<Tablero>,
}

pub fn router(state: ApiState, web_dir: &str) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/entidades", get(entidades))
        .route("/grafico", get(grafico))
        .route("/mapa", get(mapa))
        .route("/informes", get(informes))
        .route("/kpis", get(kpis))
        .fallback_service(ServeDir::new(web_dir))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
}

/// Entidad vacia en el query equivale a "sin seleccion"
fn seleccion(entidad: &Option<String>) -> Option<&str> {
    entidad.as_deref().filter(|e| !e.is_empty())
}

/// Opcion del desplegable de entidades
#[derive(Serialize)]
struct Opcion {
    label: String,
    value: String,
}

async fn entidades(State(st): State<ApiState>) -> impl IntoResponse {
    let opciones: Vec<Opcion> = st
        .tablero
        .entidades()
        .iter()
        .map(|e| Opcion { label: e.clone(), value: e.clone() })
        .collect();
    Json(opciones)
}

#[derive(Debug, Deserialize)]
pub struct GraficoQuery {
    /// NombreTipoProceso (por defecto) o Tipo
    #[serde(default)]
    pub campo: CampoAgrupacion,
    pub entidad: Option<String>,
}

#[derive(Serialize)]
struct RespuestaGrafico {
    campo: CampoAgrupacion,
    entidad: Option<String>,
    primario: Distribucion,
    subestados: Distribucion,
    figura: Value,
}

async fn grafico(State(st): State<ApiState>, Query(q): Query<GraficoQuery>) -> impl IntoResponse {
    let entidad = seleccion(&q.entidad);
    let agregado = st.tablero.agregar(q.campo, entidad);
    let figura = figura_barras(q.campo, &agregado);
    Json(RespuestaGrafico {
        campo: q.campo,
        entidad: entidad.map(str::to_string),
        primario: agregado.primario,
        subestados: agregado.subestados,
        figura,
    })
}

#[derive(Debug, Deserialize)]
pub struct MapaQuery {
    pub entidad: Option<String>,
}

#[derive(Serialize)]
struct VistaMapa {
    disponible: bool,
    centro: Punto,
    marcador: Punto,
    tooltip: String,
    zoom: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl VistaMapa {
    fn desde(u: Ubicacion) -> Self {
        Self { disponible: true, centro: u.centro, marcador: u.marcador, tooltip: u.tooltip, zoom: ZOOM_MAPA, error: None }
    }
}

async fn mapa(State(st): State<ApiState>, Query(q): Query<MapaQuery>) -> impl IntoResponse {
    let vista = match st.tablero.ubicar(seleccion(&q.entidad)) {
        Ok(u) => VistaMapa::desde(u),
        Err(e) => {
            // El mapa queda "no disponible"; el resto del tablero sigue
            warn!("mapa: {e}");
            VistaMapa { disponible: false, error: Some(e.to_string()), ..VistaMapa::desde(Ubicacion::por_defecto()) }
        }
    };
    Json(vista)
}

async fn informes(State(st): State<ApiState>) -> impl IntoResponse {
    Json(st.tablero.informes().clone())
}

async fn kpis(State(st): State<ApiState>) -> impl IntoResponse {
    Json(st.tablero.kpis().clone())
}
