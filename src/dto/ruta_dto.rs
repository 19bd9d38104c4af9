//! DTOs para sugerencia de rutas
//!
//! Incluye la parada que se envía al proveedor, la respuesta esperada
//! del modelo y el resultado que recibe el operador.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::parada::TipoParada;

/// Parada candidata para el proveedor de rutas
#[derive(Debug, Clone, Serialize)]
pub struct RouteStop {
    pub id: String,
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TipoParada>,
}

/// Respuesta JSON que se le pide al modelo
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteSuggestion {
    pub orden: Vec<String>,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default)]
    pub distancia_estimada_km: Option<f64>,
}

/// Diferencias entre las paradas enviadas y el orden devuelto
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PermutationCheck {
    pub faltantes: Vec<String>,
    pub sobrantes: Vec<String>,
    pub duplicadas: Vec<String>,
}

impl PermutationCheck {
    pub fn is_valid(&self) -> bool {
        self.faltantes.is_empty() && self.sobrantes.is_empty() && self.duplicadas.is_empty()
    }

    pub fn resumen(&self) -> String {
        let mut partes = Vec::new();
        if !self.faltantes.is_empty() {
            partes.push(format!("faltan {}", self.faltantes.join(", ")));
        }
        if !self.sobrantes.is_empty() {
            partes.push(format!("sobran {}", self.sobrantes.join(", ")));
        }
        if !self.duplicadas.is_empty() {
            partes.push(format!("repetidas {}", self.duplicadas.join(", ")));
        }
        partes.join("; ")
    }
}

/// Response de `POST /api/repartos/:id/sugerir-ruta`
#[derive(Debug, Clone, Serialize)]
pub struct RutaSugerida {
    pub reparto_id: Uuid,
    pub orden: Vec<String>,
    pub notas: Option<String>,
    pub distancia_estimada_km: Option<f64>,
    pub paradas_consideradas: usize,
    pub validacion: PermutationCheck,
}
