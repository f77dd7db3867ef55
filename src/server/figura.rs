//! figura.rs
//! Documento de figura (formato Plotly) del grafico comparativo: dos series de
//! barras superpuestas sobre fondo transparente y texto blanco.

use serde_json::{json, Value};

use crate::data::agregacion::Agregado;
use crate::models::types::CampoAgrupacion;

pub const TITULO: &str = "Comparación de cantidad de datos";
pub const NOMBRE_SERIE_SUBESTADOS: &str = "Cantidad de Subestados";
const COLOR_PRIMARIO: &str = "rgba(175, 215, 231, 0.7)";
const COLOR_SUBESTADOS: &str = "rgba(0, 102, 153, 0.7)";

pub fn figura_barras(campo: CampoAgrupacion, agregado: &Agregado) -> Value {
    json!({
        "data": [
            {
                "x": agregado.primario.etiquetas(),
                "y": agregado.primario.cantidades(),
                "type": "bar",
                "name": campo.columna(),
                "marker": { "color": COLOR_PRIMARIO },
            },
            {
                "x": agregado.subestados.etiquetas(),
                "y": agregado.subestados.cantidades(),
                "type": "bar",
                "name": NOMBRE_SERIE_SUBESTADOS,
                "marker": { "color": COLOR_SUBESTADOS },
            }
        ],
        "layout": {
            "title": TITULO,
            "plot_bgcolor": "rgba(0,0,0,0)",
            "paper_bgcolor": "rgba(0,0,0,0)",
            "font": { "color": "white" },
            "legend": { "orientation": "h", "yanchor": "bottom", "y": 1.02, "xanchor": "right", "x": 1 },
            "barmode": "overlay",
        }
    })
}
