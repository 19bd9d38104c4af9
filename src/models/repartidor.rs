//! Modelo de Repartidor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Repartidor {
    pub id: Uuid,
    pub nombre: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RepartidorData {
    pub nombre: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub activo: bool,
}
