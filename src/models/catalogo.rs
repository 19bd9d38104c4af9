//! Catálogos de referencia: tipos de paquete y tipos de servicio

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TipoPaquete {
    pub id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub dimensiones: Option<String>,
    pub peso_max_kg: Option<Decimal>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TipoPaqueteData {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub dimensiones: Option<String>,
    pub peso_max_kg: Option<Decimal>,
    pub activo: bool,
}

/// Servicio con precio de catálogo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TipoServicio {
    pub id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub tiempo_entrega_horas: Option<i32>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TipoServicioData {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub tiempo_entrega_horas: Option<i32>,
    pub activo: bool,
}
