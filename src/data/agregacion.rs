//! agregacion.rs
//!
//! Conteos del grafico comparativo sobre la hoja v1.
//!
//! - Filtra por entidad (igualdad exacta, sin recortar espacios).
//! - Serie principal: filas por valor del campo de agrupacion.
//! - Serie de subestados: lo mismo, restringido a los cinco subestados seguidos.
//!
//! Funciones puras: mismo input, mismo output.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::types::{CampoAgrupacion, Distribucion, RegistroProceso};

/// Subestados que cuentan para la segunda serie (comparacion exacta)
pub const SUBESTADOS_SEGUIDOS: [&str; 5] = [
    "REVISADO",
    "EVALUADO",
    "OBSERVADO EN EVALUACION",
    "SUBSANADO EN EVALUACION",
    "EVALUACION EN PROCESO",
];

#[inline]
pub fn es_subestado_seguido(sub_estado: &str) -> bool {
    SUBESTADOS_SEGUIDOS.contains(&sub_estado)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Agregado {
    pub primario: Distribucion,
    pub subestados: Distribucion,
}

pub fn agregar(
    registros: &[RegistroProceso],
    campo: CampoAgrupacion,
    entidad: Option<&str>,
) -> Agregado {
    let mut primario: HashMap<&str, usize> = HashMap::new();
    let mut subestados: HashMap<&str, usize> = HashMap::new();

    let filtrados = registros
        .iter()
        .filter(|r| entidad.map_or(true, |e| r.nombre_entidad == e));

    for r in filtrados {
        let v = r.valor(campo);
        *primario.entry(v).or_insert(0) += 1;
        if es_subestado_seguido(&r.sub_estado) {
            *subestados.entry(v).or_insert(0) += 1;
        }
    }

    Agregado {
        primario: Distribucion::desde_conteos(primario),
        subestados: Distribucion::desde_conteos(subestados),
    }
}

/// Conteo de "INFORME emitido por la DME" sobre toda la hoja, sin celdas vacias
pub fn conteo_informes(registros: &[RegistroProceso]) -> Distribucion {
    Distribucion::contar(
        registros
            .iter()
            .map(|r| r.informe_dme.as_str())
            .filter(|v| !v.is_empty()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(entidad: &str, ntp: &str, tipo: &str, sub: &str, informe: &str) -> RegistroProceso {
        RegistroProceso {
            nombre_entidad: entidad.into(),
            nombre_tipo_proceso: ntp.into(),
            tipo: tipo.into(),
            sub_estado: sub.into(),
            informe_dme: informe.into(),
        }
    }

    fn muestra() -> Vec<RegistroProceso> {
        vec![
            reg("EPS X", "Fusion", "A", "REVISADO", "SI"),
            reg("EPS X", "Fusion", "A", "OBSERVADO EN EVALUACION", ""),
            reg("EPS X", "Integracion", "B", "PENDIENTE", "NO"),
            reg("EPS Y", "Integracion", "B", "EVALUADO", "SI"),
            reg("EPS Y", "", "C", "EVALUACION EN PROCESO", ""),
            reg("EPS Z", "Fusion", "", "revisado", "SI"),
        ]
    }

    #[test]
    fn escenario_eps_x_por_tipo() {
        let a = agregar(&muestra(), CampoAgrupacion::Tipo, Some("EPS X"));
        assert_eq!(a.primario, Distribucion::desde_conteos([("A", 2), ("B", 1)]));
        assert_eq!(a.subestados, Distribucion::desde_conteos([("A", 2)]));
    }

    #[test]
    fn total_primario_igual_a_filas_filtradas() {
        let regs = muestra();
        for campo in [CampoAgrupacion::NombreTipoProceso, CampoAgrupacion::Tipo] {
            assert_eq!(agregar(&regs, campo, None).primario.total(), regs.len());
            for ent in ["EPS X", "EPS Y", "EPS Z"] {
                let n = regs.iter().filter(|r| r.nombre_entidad == ent).count();
                assert_eq!(agregar(&regs, campo, Some(ent)).primario.total(), n);
            }
        }
    }

    #[test]
    fn valores_vacios_cuentan_bajo_etiqueta_vacia() {
        let a = agregar(&muestra(), CampoAgrupacion::NombreTipoProceso, Some("EPS Y"));
        assert_eq!(a.primario.get(""), Some(1));
        assert_eq!(a.subestados.get(""), Some(1));
    }

    #[test]
    fn entidad_desconocida_da_distribuciones_vacias() {
        let regs = muestra();
        for ent in ["EPS W", "eps x", " EPS X"] {
            let a = agregar(&regs, CampoAgrupacion::Tipo, Some(ent));
            assert!(a.primario.is_empty());
            assert!(a.subestados.is_empty());
        }
    }

    #[test]
    fn subestados_son_subconjunto_del_primario() {
        let regs = muestra();
        for campo in [CampoAgrupacion::NombreTipoProceso, CampoAgrupacion::Tipo] {
            let a = agregar(&regs, campo, None);
            for c in a.subestados.iter() {
                let p = a.primario.get(&c.etiqueta).expect("etiqueta en primario");
                assert!(c.cantidad <= p);
            }
        }
    }

    #[test]
    fn subestado_distingue_mayusculas() {
        let a = agregar(&muestra(), CampoAgrupacion::Tipo, Some("EPS Z"));
        assert_eq!(a.primario.total(), 1);
        assert!(a.subestados.is_empty());
    }

    #[test]
    fn agregar_es_idempotente() {
        let regs = muestra();
        let a = agregar(&regs, CampoAgrupacion::NombreTipoProceso, None);
        let b = agregar(&regs, CampoAgrupacion::NombreTipoProceso, None);
        assert_eq!(a, b);
    }

    #[test]
    fn tabla_vacia_no_falla() {
        let a = agregar(&[], CampoAgrupacion::Tipo, None);
        assert_eq!(a, Agregado::default());
    }

    #[test]
    fn informes_descartan_celdas_vacias() {
        let d = conteo_informes(&muestra());
        assert_eq!(d, Distribucion::desde_conteos([("SI", 3), ("NO", 1)]));
    }
}
