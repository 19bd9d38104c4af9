//! Sugerencia de opciones de entrega
//!
//! Dado un borrador de envío, el asesor recomienda servicios del catálogo
//! activo. Sólo se devuelven recomendaciones que existan en ese catálogo.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::dto::envio_dto::{OpcionEntrega, OpcionesEntregaRequest, OpcionesEntregaResponse};
use crate::models::catalogo::TipoServicio;
use crate::repositories::catalogo_repository::{TipoPaqueteRepository, TipoServicioRepository};
use crate::services::gemini_client::GeminiClient;
use crate::services::unit_of_work::Outcome;
use crate::utils::errors::{validation_error, AppError, AppResult};

#[derive(Debug, Clone, Serialize)]
pub struct ServicioOfrecido {
    pub id: String,
    pub nombre: String,
    pub precio: String,
    pub tiempo_entrega_horas: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolicitudOpciones {
    pub direccion_destino: String,
    pub peso_kg: String,
    pub tipo_paquete: Option<String>,
    pub catalogo: Vec<ServicioOfrecido>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recomendacion {
    pub tipo_servicio_id: String,
    #[serde(default)]
    pub motivo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RespuestaOpciones {
    #[serde(default)]
    pub recomendaciones: Vec<Recomendacion>,
    #[serde(default)]
    pub notas: Option<String>,
}

#[async_trait]
pub trait DeliveryOptionAdvisor: Send + Sync {
    async fn recomendar(&self, solicitud: &SolicitudOpciones) -> AppResult<RespuestaOpciones>;
}

pub struct GeminiDeliveryAdvisor {
    client: GeminiClient,
}

impl GeminiDeliveryAdvisor {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    fn build_prompt(solicitud: &SolicitudOpciones) -> String {
        let datos = serde_json::to_string_pretty(solicitud).unwrap_or_default();
        format!(
            "Sos un asistente de una empresa de mensajería. Según el destino, el peso y el tipo \
             de paquete, recomendá los servicios más adecuados del catálogo. Sólo podés \
             recomendar servicios del catálogo, usando su id.\n\n\
             Envío:\n{}\n\n\
             Respondé sólo con JSON con esta forma:\n\
             {{\"recomendaciones\": [{{\"tipo_servicio_id\": \"id\", \"motivo\": \"texto breve\"}}], \
             \"notas\": \"texto breve\"}}",
            datos
        )
    }
}

#[async_trait]
impl DeliveryOptionAdvisor for GeminiDeliveryAdvisor {
    async fn recomendar(&self, solicitud: &SolicitudOpciones) -> AppResult<RespuestaOpciones> {
        log::info!(
            "💡 Pidiendo opciones de entrega sobre {} servicios",
            solicitud.catalogo.len()
        );
        self.client.generate_json(&Self::build_prompt(solicitud)).await
    }
}

pub fn armar_solicitud(
    request: &OpcionesEntregaRequest,
    tipo_paquete: Option<String>,
    catalogo: &[TipoServicio],
) -> SolicitudOpciones {
    SolicitudOpciones {
        direccion_destino: request.direccion_destino.trim().to_string(),
        peso_kg: request.peso_kg.to_string(),
        tipo_paquete,
        catalogo: catalogo
            .iter()
            .map(|s| ServicioOfrecido {
                id: s.id.to_string(),
                nombre: s.nombre.clone(),
                precio: s.precio.to_string(),
                tiempo_entrega_horas: s.tiempo_entrega_horas,
            })
            .collect(),
    }
}

/// Quedarse con las recomendaciones que existen en el catálogo ofrecido.
/// Las demás se descartan con un aviso; las repetidas se ignoran.
pub fn filtrar_recomendaciones(
    respuesta: RespuestaOpciones,
    catalogo: &[TipoServicio],
    info: &mut Vec<String>,
) -> OpcionesEntregaResponse {
    let mut opciones: Vec<OpcionEntrega> = Vec::new();

    for recomendacion in respuesta.recomendaciones {
        let id = recomendacion.tipo_servicio_id.trim();
        let Some(servicio) = catalogo.iter().find(|s| s.id.to_string() == id) else {
            info.push(format!("Se descartó el servicio '{}': no está en el catálogo", id));
            continue;
        };
        if opciones.iter().any(|o| o.tipo_servicio_id == servicio.id) {
            continue;
        }
        opciones.push(OpcionEntrega {
            tipo_servicio_id: servicio.id,
            nombre: servicio.nombre.clone(),
            precio: servicio.precio,
            tiempo_entrega_horas: servicio.tiempo_entrega_horas,
            motivo: recomendacion.motivo,
        });
    }

    OpcionesEntregaResponse {
        opciones,
        notas: respuesta.notas,
    }
}

pub struct OpcionesEntregaService {
    paquetes: TipoPaqueteRepository,
    servicios: TipoServicioRepository,
    advisor: Option<Arc<dyn DeliveryOptionAdvisor>>,
}

impl OpcionesEntregaService {
    pub fn new(pool: PgPool, advisor: Option<Arc<dyn DeliveryOptionAdvisor>>) -> Self {
        Self {
            paquetes: TipoPaqueteRepository::new(pool.clone()),
            servicios: TipoServicioRepository::new(pool),
            advisor,
        }
    }

    pub async fn sugerir(
        &self,
        request: OpcionesEntregaRequest,
    ) -> AppResult<Outcome<OpcionesEntregaResponse>> {
        request.validate()?;
        let advisor = self.advisor.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable(
                "Sugerencias de entrega no disponibles: falta configurar GEMINI_API_KEY".to_string(),
            )
        })?;

        let catalogo = self.servicios.list_activos().await?;
        if catalogo.is_empty() {
            return Err(validation_error(
                "tipo_servicio_id",
                "No hay servicios activos en el catálogo",
            ));
        }

        let tipo_paquete = match request.tipo_paquete_id {
            Some(id) => self.paquetes.find_by_id(id).await?.map(|p| p.nombre),
            None => None,
        };

        let solicitud = armar_solicitud(&request, tipo_paquete, &catalogo);
        let respuesta = advisor.recomendar(&solicitud).await?;

        let mut info = Vec::new();
        let data = filtrar_recomendaciones(respuesta, &catalogo, &mut info);
        if !info.is_empty() {
            log::warn!("⚠️ Opciones de entrega filtradas: {}", info.join("; "));
        }

        Ok(Outcome {
            data,
            info,
            error: None,
        })
    }
}
