//! Modelo de Reparto
//!
//! Un reparto es el recorrido programado de un repartidor para una fecha.
//! Su estado es el único disparador del cambio de estado de los envíos
//! que transporta.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::envio::EstadoEnvio;

/// Tipo de reparto - mapea al ENUM tipo_reparto
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "tipo_reparto", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoReparto {
    Individual,
    ViajeEmpresa,
    ViajeEmpresaLote,
}

impl TipoReparto {
    pub fn requiere_empresa(&self) -> bool {
        !matches!(self, TipoReparto::Individual)
    }
}

/// Estado del reparto - mapea al ENUM estado_reparto
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "estado_reparto", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EstadoReparto {
    Asignado,
    EnCurso,
    Completado,
}

impl EstadoReparto {
    pub const ALL: [EstadoReparto; 3] = [
        EstadoReparto::Asignado,
        EstadoReparto::EnCurso,
        EstadoReparto::Completado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoReparto::Asignado => "asignado",
            EstadoReparto::EnCurso => "en_curso",
            EstadoReparto::Completado => "completado",
        }
    }

    /// Estado que adoptan los envíos del reparto cuando el reparto cambia
    pub fn estado_envio_en_cascada(&self) -> EstadoEnvio {
        match self {
            EstadoReparto::Asignado => EstadoEnvio::AsignadoAReparto,
            EstadoReparto::EnCurso => EstadoEnvio::EnTransito,
            EstadoReparto::Completado => EstadoEnvio::Entregado,
        }
    }
}

impl fmt::Display for EstadoReparto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstadoReparto {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|estado| estado.as_str() == value.trim())
            .ok_or_else(|| {
                format!(
                    "Estado de reparto '{}' inválido. Valores permitidos: asignado, en_curso, completado",
                    value
                )
            })
    }
}

/// Reparto principal - mapea la tabla repartos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reparto {
    pub id: Uuid,
    pub fecha_reparto: NaiveDate,
    pub repartidor_id: Uuid,
    pub tipo: TipoReparto,
    pub empresa_id: Option<Uuid>,
    pub estado: EstadoReparto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar un reparto; siempre nace en estado `asignado`
#[derive(Debug, Clone)]
pub struct NuevoReparto {
    pub fecha_reparto: NaiveDate,
    pub repartidor_id: Uuid,
    pub tipo: TipoReparto,
    pub empresa_id: Option<Uuid>,
}
