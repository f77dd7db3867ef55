//! error.rs
//! Errores de dominio del tablero: esquema de las hojas, coordenadas y credenciales.
//!
//! Los errores de red y de arranque se propagan con `anyhow` en los bordes
//! del proceso; aqui solo viven los que el dominio necesita distinguir.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableroError {
    #[error("la hoja {hoja:?} no tiene cabecera")]
    HojaVacia { hoja: String },

    #[error("la hoja {hoja:?} no tiene las columnas requeridas: {}", .faltantes.join(", "))]
    Esquema { hoja: String, faltantes: Vec<String> },

    #[error("{campo} no numérica para {entidad:?}: {valor:?}")]
    Coordenada {
        entidad: String,
        campo: &'static str,
        valor: String,
    },

    #[error("credenciales inválidas en {ruta}: {motivo}")]
    Credenciales { ruta: String, motivo: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esquema_lista_todas_las_columnas_faltantes() {
        let e = TableroError::Esquema {
            hoja: "v2".into(),
            faltantes: vec!["Latitud".into(), "Longitud".into()],
        };
        assert_eq!(
            e.to_string(),
            "la hoja \"v2\" no tiene las columnas requeridas: Latitud, Longitud"
        );
    }
}
