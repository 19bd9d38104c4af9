use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::empresa::Empresa;
use crate::models::envio::{Envio, EstadoEnvio};
use crate::models::parada::{DireccionMovimiento, ParadaReparto};
use crate::models::repartidor::Repartidor;
use crate::models::reparto::{Reparto, TipoReparto};
use crate::models::Coordenadas;
use crate::utils::pagination::PaginationParams;

// Request para armar un reparto con envíos ya existentes
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CrearRepartoRequest {
    pub fecha_reparto: NaiveDate,
    pub repartidor_id: Uuid,
    pub tipo: TipoReparto,
    pub empresa_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Debe indicar al menos un envío"))]
    pub envio_ids: Vec<Uuid>,
}

// Request para un reparto por lote: los envíos se generan desde los clientes
#[derive(Debug, Clone, Deserialize)]
pub struct CrearRepartoLoteRequest {
    pub fecha_reparto: NaiveDate,
    pub repartidor_id: Uuid,
    pub empresa_id: Uuid,
    #[serde(default)]
    pub cliente_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CambiarEstadoRepartoRequest {
    pub estado: String,
    // Si se omite, se usan los envíos de las paradas del reparto
    pub envio_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize)]
pub struct MoverParadaRequest {
    pub direccion: DireccionMovimiento,
}

// Ids de parada, ids de envío o el token `company-{id}`
#[derive(Debug, Deserialize)]
pub struct AplicarOrdenRequest {
    pub orden: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RepartoFilters {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub fecha: Option<NaiveDate>,
    pub estado: Option<String>,
    pub repartidor_id: Option<Uuid>,
    pub empresa_id: Option<Uuid>,
}

impl RepartoFilters {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

// Response de creación (modo directo o por lote)
#[derive(Debug, Clone, Serialize)]
pub struct RepartoCreado {
    pub reparto: Reparto,
    pub paradas: Vec<ParadaReparto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub envios_creados: Vec<Uuid>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clientes_omitidos: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovimientoParada {
    // false cuando la parada ya estaba en el extremo
    pub movida: bool,
    pub paradas: Vec<ParadaReparto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CambioEstadoReparto {
    pub reparto: Reparto,
    pub estado_envios: EstadoEnvio,
    pub envios_actualizados: u64,
}

// Parada con lo necesario para mostrarla en el recorrido
#[derive(Debug, Clone, Serialize)]
pub struct ParadaDetalle {
    #[serde(flatten)]
    pub parada: ParadaReparto,
    // Empresa de retiro o destinatario de la entrega
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub coordenadas: Option<Coordenadas>,
    pub envio: Option<Envio>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepartoDetalle {
    pub reparto: Reparto,
    pub repartidor: Option<Repartidor>,
    pub empresa: Option<Empresa>,
    pub paradas: Vec<ParadaDetalle>,
}
