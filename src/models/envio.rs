//! Modelo de Envío
//!
//! Mapea la tabla `envios` y el ENUM `estado_envio`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::Coordenadas;

/// Estado del envío - mapea al ENUM estado_envio
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "estado_envio", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EstadoEnvio {
    PendienteAsignacion,
    SugeridoIa,
    #[sqlx(rename = "asignado_a_reparto")]
    #[serde(rename = "asignado_a_reparto")]
    AsignadoAReparto,
    EnTransito,
    Entregado,
    Cancelado,
    ProblemaEntrega,
}

impl EstadoEnvio {
    pub const ALL: [EstadoEnvio; 7] = [
        EstadoEnvio::PendienteAsignacion,
        EstadoEnvio::SugeridoIa,
        EstadoEnvio::AsignadoAReparto,
        EstadoEnvio::EnTransito,
        EstadoEnvio::Entregado,
        EstadoEnvio::Cancelado,
        EstadoEnvio::ProblemaEntrega,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoEnvio::PendienteAsignacion => "pendiente_asignacion",
            EstadoEnvio::SugeridoIa => "sugerido_ia",
            EstadoEnvio::AsignadoAReparto => "asignado_a_reparto",
            EstadoEnvio::EnTransito => "en_transito",
            EstadoEnvio::Entregado => "entregado",
            EstadoEnvio::Cancelado => "cancelado",
            EstadoEnvio::ProblemaEntrega => "problema_entrega",
        }
    }

    /// Un envío sólo puede sumarse a un reparto desde estos estados
    pub fn is_asignable(&self) -> bool {
        matches!(self, EstadoEnvio::PendienteAsignacion | EstadoEnvio::SugeridoIa)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EstadoEnvio::Entregado | EstadoEnvio::Cancelado)
    }
}

impl fmt::Display for EstadoEnvio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstadoEnvio {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|estado| estado.as_str() == value.trim())
            .ok_or_else(|| {
                let permitidos: Vec<&str> = Self::ALL.iter().map(|e| e.as_str()).collect();
                format!(
                    "Estado de envío '{}' inválido. Valores permitidos: {}",
                    value,
                    permitidos.join(", ")
                )
            })
    }
}

/// Envío principal - mapea la tabla envios
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Envio {
    pub id: Uuid,
    pub cliente_id: Option<Uuid>,
    pub nombre_cliente_temporal: Option<String>,
    pub direccion_destino: String,
    pub latitud_destino: Option<f64>,
    pub longitud_destino: Option<f64>,
    pub tipo_paquete_id: Option<Uuid>,
    pub peso_kg: Decimal,
    pub tipo_servicio_id: Option<Uuid>,
    pub precio_final: Option<Decimal>,
    pub estado: EstadoEnvio,
    pub reparto_id: Option<Uuid>,
    pub notas: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Envio {
    pub fn coordenadas(&self) -> Option<Coordenadas> {
        Coordenadas::from_columns(self.latitud_destino, self.longitud_destino)
    }
}

/// Datos para insertar o actualizar un envío
#[derive(Debug, Clone)]
pub struct NuevoEnvio {
    pub cliente_id: Option<Uuid>,
    pub nombre_cliente_temporal: Option<String>,
    pub direccion_destino: String,
    pub coordenadas: Option<Coordenadas>,
    pub tipo_paquete_id: Option<Uuid>,
    pub peso_kg: Decimal,
    pub tipo_servicio_id: Option<Uuid>,
    pub precio_final: Option<Decimal>,
    pub estado: EstadoEnvio,
    pub reparto_id: Option<Uuid>,
    pub notas: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estado_round_trip_text() {
        for estado in EstadoEnvio::ALL {
            assert_eq!(estado.as_str().parse::<EstadoEnvio>().unwrap(), estado);
        }
    }

    #[test]
    fn test_estado_invalido_lista_permitidos() {
        let err = "perdido".parse::<EstadoEnvio>().unwrap_err();
        assert!(err.contains("problema_entrega"));
    }

    #[test]
    fn test_serde_usa_valores_de_base() {
        let json = serde_json::to_string(&EstadoEnvio::AsignadoAReparto).unwrap();
        assert_eq!(json, "\"asignado_a_reparto\"");
    }

    #[test]
    fn test_asignable_y_terminal() {
        assert!(EstadoEnvio::PendienteAsignacion.is_asignable());
        assert!(!EstadoEnvio::EnTransito.is_asignable());
        assert!(EstadoEnvio::Cancelado.is_terminal());
        assert!(!EstadoEnvio::ProblemaEntrega.is_terminal());
    }
}
