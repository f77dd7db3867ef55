//! tabla.rs
//!
//! Grilla de texto tal como llega de Google Sheets y su conversion a
//! registros tipados.
//!
//! - La primera fila es la cabecera; el resto son datos.
//! - La API de Sheets recorta las celdas vacias al final de cada fila, por
//!   eso las filas cortas se completan con "" y las celdas sobrantes se ignoran.
//! - La cabecera se valida una sola vez contra las columnas requeridas;
//!   si falta alguna se devuelve `TableroError::Esquema` con todas las faltantes.

use crate::models::error::TableroError;
use crate::models::types::*;

#[derive(Clone, Debug)]
pub struct TablaCruda {
    pub hoja: String,
    pub cabecera: Vec<String>,
    pub filas: Vec<Vec<String>>,
}

impl TablaCruda {
    pub fn desde_grilla(hoja: &str, grilla: Vec<Vec<String>>) -> Result<Self, TableroError> {
        let mut it = grilla.into_iter();
        let cabecera = it
            .next()
            .ok_or_else(|| TableroError::HojaVacia { hoja: hoja.to_string() })?;
        let ancho = cabecera.len();
        let filas = it
            .map(|mut f| {
                f.resize(ancho, String::new());
                f
            })
            .collect();
        Ok(Self { hoja: hoja.to_string(), cabecera, filas })
    }

    /// Posicion de la columna (primera aparicion si esta repetida)
    pub fn indice(&self, columna: &str) -> Option<usize> {
        self.cabecera.iter().position(|c| c == columna)
    }

    /// Indices de las columnas pedidas, en el mismo orden
    fn exigir<const N: usize>(&self, columnas: [&str; N]) -> Result<[usize; N], TableroError> {
        let mut out = [0usize; N];
        let mut faltantes = Vec::new();
        for (i, col) in columnas.iter().enumerate() {
            match self.indice(col) {
                Some(idx) => out[i] = idx,
                None => faltantes.push(col.to_string()),
            }
        }
        if !faltantes.is_empty() {
            return Err(TableroError::Esquema { hoja: self.hoja.clone(), faltantes });
        }
        Ok(out)
    }

    pub fn registros_proceso(&self) -> Result<Vec<RegistroProceso>, TableroError> {
        let [ent, ntp, tipo, sub, inf] = self.exigir([
            COL_NOMBRE_ENTIDAD,
            COL_NOMBRE_TIPO_PROCESO,
            COL_TIPO,
            COL_SUB_ESTADO,
            COL_INFORME_DME,
        ])?;
        Ok(self
            .filas
            .iter()
            .map(|f| RegistroProceso {
                nombre_entidad: f[ent].clone(),
                nombre_tipo_proceso: f[ntp].clone(),
                tipo: f[tipo].clone(),
                sub_estado: f[sub].clone(),
                informe_dme: f[inf].clone(),
            })
            .collect())
    }

    pub fn registros_ubicacion(&self) -> Result<Vec<RegistroUbicacion>, TableroError> {
        let [ent, lat, lon, tipo, cf] = self.exigir([
            COL_NOMBRE_ENTIDAD,
            COL_LATITUD,
            COL_LONGITUD,
            COL_TIPO_UBICACION,
            COL_CFICHAS,
        ])?;
        Ok(self
            .filas
            .iter()
            .map(|f| RegistroUbicacion {
                nombre_entidad: f[ent].clone(),
                latitud: f[lat].clone(),
                longitud: f[lon].clone(),
                tipo: f[tipo].clone(),
                cfichas: f[cf].clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fila(celdas: &[&str]) -> Vec<String> {
        celdas.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn completa_filas_cortas_e_ignora_celdas_sobrantes() {
        let t = TablaCruda::desde_grilla(
            "v2",
            vec![
                fila(&["NombreEntidad", "Latitud", "Longitud", "tipo", "Cfichas"]),
                fila(&["EPS X", "-12.05", "-77.03"]),
                fila(&["EPS Y", "1", "2", "T", "3", "extra"]),
            ],
        )
        .unwrap();
        let regs = t.registros_ubicacion().unwrap();
        assert_eq!(regs[0].tipo, "");
        assert_eq!(regs[0].cfichas, "");
        assert_eq!(regs[1].cfichas, "3");
    }

    #[test]
    fn columnas_en_cualquier_orden() {
        let t = TablaCruda::desde_grilla(
            "v1",
            vec![
                fila(&["SubEstado", "INFORME emitido por la DME", "Tipo", "NombreEntidad", "NombreTipoProceso", "Otra"]),
                fila(&["REVISADO", "", "A", "EPS X", "Fusion", "x"]),
            ],
        )
        .unwrap();
        let regs = t.registros_proceso().unwrap();
        assert_eq!(
            regs[0],
            RegistroProceso {
                nombre_entidad: "EPS X".into(),
                nombre_tipo_proceso: "Fusion".into(),
                tipo: "A".into(),
                sub_estado: "REVISADO".into(),
                informe_dme: "".into(),
            }
        );
    }

    #[test]
    fn grilla_vacia_no_tiene_cabecera() {
        let err = TablaCruda::desde_grilla("v1", vec![]).unwrap_err();
        assert!(matches!(err, TableroError::HojaVacia { .. }));
    }

    #[test]
    fn reporta_todas_las_columnas_faltantes() {
        let t = TablaCruda::desde_grilla("v2", vec![fila(&["NombreEntidad", "tipo"])]).unwrap();
        match t.registros_ubicacion().unwrap_err() {
            TableroError::Esquema { hoja, faltantes } => {
                assert_eq!(hoja, "v2");
                assert_eq!(faltantes, vec!["Latitud", "Longitud", "Cfichas"]);
            }
            e => panic!("error inesperado: {e}"),
        }
    }

    #[test]
    fn solo_cabecera_da_cero_registros() {
        let t = TablaCruda::desde_grilla("v2", vec![fila(&["NombreEntidad", "Latitud", "Longitud", "tipo", "Cfichas"])]).unwrap();
        assert!(t.registros_ubicacion().unwrap().is_empty());
    }
}
