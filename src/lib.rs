//! Tablero de Control OTASS.
//!
//! Lee dos hojas de Google Sheets (procesos `v1` y ubicaciones `v2`), y sirve
//! un grafico comparativo filtrable por entidad y un mapa con la ubicacion de
//! la entidad seleccionada.

pub mod data;
pub mod models;
pub mod server;

pub use data::agregacion::{agregar, Agregado};
pub use data::tablero::{cargar, Tablero};
pub use data::ubicacion::ubicar;
pub use models::error::TableroError;
pub use models::types::{AppCfg, CampoAgrupacion, Distribucion, Ubicacion};
