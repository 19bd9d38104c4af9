//! Modelo de Empresa
//!
//! Mapea la tabla `empresas`. Una empresa puede ser punto de retiro
//! de un reparto si tiene dirección y coordenadas completas.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Coordenadas;
use crate::utils::validation::non_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Empresa {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub precio_por_envio: Option<Decimal>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Empresa {
    pub fn coordenadas(&self) -> Option<Coordenadas> {
        Coordenadas::from_columns(self.latitud, self.longitud)
    }

    /// Dirección y coordenadas del punto de retiro, si están completas
    pub fn punto_retiro(&self) -> Option<(&str, Coordenadas)> {
        let direccion = non_blank(self.direccion.as_deref())?;
        let coordenadas = self.coordenadas()?;
        Some((direccion, coordenadas))
    }
}

/// Datos para insertar o actualizar una empresa
#[derive(Debug, Clone)]
pub struct EmpresaData {
    pub nombre: String,
    pub direccion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub precio_por_envio: Option<Decimal>,
    pub activo: bool,
}
