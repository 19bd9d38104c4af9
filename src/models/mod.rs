//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL de `migrations/` y los enums de estado del dominio.

pub mod catalogo;
pub mod cliente;
pub mod empresa;
pub mod envio;
pub mod parada;
pub mod repartidor;
pub mod reparto;

use serde::{Deserialize, Serialize};

/// Par de coordenadas WGS84
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordenadas {
    pub lat: f64,
    pub lng: f64,
}

impl Coordenadas {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Construir desde columnas opcionales; ambas deben estar presentes
    pub fn from_columns(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }
}
