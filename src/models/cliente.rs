//! Modelo de Cliente

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Coordenadas;
use crate::utils::validation::non_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cliente {
    pub id: Uuid,
    pub empresa_id: Option<Uuid>,
    pub nombre: String,
    pub apellido: Option<String>,
    pub direccion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub notas: Option<String>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cliente {
    pub fn nombre_completo(&self) -> String {
        match non_blank(self.apellido.as_deref()) {
            Some(apellido) => format!("{} {}", self.nombre.trim(), apellido),
            None => self.nombre.trim().to_string(),
        }
    }

    /// Dirección guardada, si no está en blanco
    pub fn direccion_utilizable(&self) -> Option<&str> {
        non_blank(self.direccion.as_deref())
    }

    pub fn coordenadas(&self) -> Option<Coordenadas> {
        Coordenadas::from_columns(self.latitud, self.longitud)
    }
}

/// Datos para insertar o actualizar un cliente
#[derive(Debug, Clone)]
pub struct ClienteData {
    pub empresa_id: Option<Uuid>,
    pub nombre: String,
    pub apellido: Option<String>,
    pub direccion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub notas: Option<String>,
    pub activo: bool,
}
