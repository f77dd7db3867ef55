//! ubicacion.rs
//!
//! Ubicacion de una entidad en el mapa a partir de la hoja v2.
//!
//! - Sin seleccion o sin coincidencia: centro nacional, marcador en (0, 0), tooltip vacio.
//! - Con coincidencia: se usa la primera fila en orden de la hoja.
//! - Latitud/Longitud no numericas devuelven `TableroError::Coordenada`.

use crate::models::error::TableroError;
use crate::models::types::{Punto, RegistroUbicacion, Ubicacion, COL_LATITUD, COL_LONGITUD};

/// Acepta coma decimal ("-12,05"); rechaza NaN e infinitos
fn parse_coord(s: &str) -> Option<f64> {
    let v = s.trim();
    if v.is_empty() { return None; }
    let v = if v.contains(',') && !v.contains('.') { v.replace(',', ".") } else { v.to_string() };
    v.parse::<f64>().ok().filter(|x| x.is_finite())
}

fn coordenada(fila: &RegistroUbicacion, campo: &'static str, valor: &str) -> Result<f64, TableroError> {
    parse_coord(valor).ok_or_else(|| TableroError::Coordenada {
        entidad: fila.nombre_entidad.clone(),
        campo,
        valor: valor.to_string(),
    })
}

pub fn ubicar(registros: &[RegistroUbicacion], entidad: Option<&str>) -> Result<Ubicacion, TableroError> {
    let Some(entidad) = entidad else {
        return Ok(Ubicacion::por_defecto());
    };
    let Some(fila) = registros.iter().find(|r| r.nombre_entidad == entidad) else {
        return Ok(Ubicacion::por_defecto());
    };

    let lat = coordenada(fila, COL_LATITUD, &fila.latitud)?;
    let lon = coordenada(fila, COL_LONGITUD, &fila.longitud)?;
    let tooltip = format!("Tipo: {}, Cfichas: {}", fila.tipo, fila.cfichas);
    Ok(Ubicacion::en(Punto(lat, lon), tooltip))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(entidad: &str, lat: &str, lon: &str, tipo: &str, cfichas: &str) -> RegistroUbicacion {
        RegistroUbicacion {
            nombre_entidad: entidad.into(),
            latitud: lat.into(),
            longitud: lon.into(),
            tipo: tipo.into(),
            cfichas: cfichas.into(),
        }
    }

    #[test]
    fn sin_seleccion_devuelve_vista_nacional() {
        let regs = vec![reg("EPS X", "-12.05", "-77.03", "Tipo1", "5")];
        assert_eq!(ubicar(&regs, None).unwrap(), Ubicacion::por_defecto());
        assert_eq!(ubicar(&[], None).unwrap(), Ubicacion::por_defecto());
    }

    #[test]
    fn escenario_eps_x() {
        let regs = vec![reg("EPS X", "-12.05", "-77.03", "Tipo1", "5")];
        let u = ubicar(&regs, Some("EPS X")).unwrap();
        assert_eq!(u.centro, Punto(-12.05, -77.03));
        assert_eq!(u.marcador, Punto(-12.05, -77.03));
        assert_eq!(u.tooltip, "Tipo: Tipo1, Cfichas: 5");
    }

    #[test]
    fn entidad_ausente_devuelve_vista_nacional() {
        let regs = vec![reg("EPS X", "-12.05", "-77.03", "Tipo1", "5")];
        assert_eq!(ubicar(&regs, Some("EPS Q")).unwrap(), Ubicacion::por_defecto());
    }

    #[test]
    fn con_duplicados_gana_la_primera_fila() {
        let regs = vec![
            reg("EPS X", "-12.05", "-77.03", "Tipo1", "5"),
            reg("EPS X", "-8.1", "-79.0", "Tipo2", "9"),
        ];
        let u = ubicar(&regs, Some("EPS X")).unwrap();
        assert_eq!(u.centro, Punto(-12.05, -77.03));
        assert_eq!(u.tooltip, "Tipo: Tipo1, Cfichas: 5");
    }

    #[test]
    fn coma_decimal_y_espacios() {
        let regs = vec![reg("EPS X", " -12,05 ", "-77.03", "", "")];
        let u = ubicar(&regs, Some("EPS X")).unwrap();
        assert_eq!(u.centro, Punto(-12.05, -77.03));
        assert_eq!(u.tooltip, "Tipo: , Cfichas: ");
    }

    #[test]
    fn coordenada_no_numerica_es_error() {
        let regs = vec![reg("EPS X", "-12.05", "sin dato", "Tipo1", "5")];
        match ubicar(&regs, Some("EPS X")).unwrap_err() {
            TableroError::Coordenada { entidad, campo, valor } => {
                assert_eq!(entidad, "EPS X");
                assert_eq!(campo, "Longitud");
                assert_eq!(valor, "sin dato");
            }
            e => panic!("error inesperado: {e}"),
        }
    }

    #[test]
    fn rechaza_vacios_y_no_finitos() {
        assert_eq!(parse_coord(""), None);
        assert_eq!(parse_coord("NaN"), None);
        assert_eq!(parse_coord("inf"), None);
        assert_eq!(parse_coord("1.234,5"), None);
        assert_eq!(parse_coord("-9.5"), Some(-9.5));
    }
}
