use std::sync::Arc;
use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::dto::envio_dto::{
    CambiarEstadoEnvioRequest, EnvioFilters, EnvioRequest, OpcionesEntregaRequest,
    OpcionesEntregaResponse,
};
use crate::models::envio::Envio;
use crate::services::delivery_options_service::{DeliveryOptionAdvisor, OpcionesEntregaService};
use crate::services::envio_service::EnvioService;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::pagination::Paginated;

pub struct EnvioController {
    service: EnvioService,
    opciones: OpcionesEntregaService,
}

impl EnvioController {
    pub fn new(state: &AppState) -> Self {
        let advisor: Option<Arc<dyn DeliveryOptionAdvisor>> = state.delivery_advisor.clone();
        Self {
            service: EnvioService::new(state.pool.clone(), state.geocoder.clone()),
            opciones: OpcionesEntregaService::new(state.pool.clone(), advisor),
        }
    }

    pub async fn crear(&self, request: EnvioRequest) -> AppResult<ApiResponse<Envio>> {
        Ok(self.service.crear(request).await?.into())
    }

    pub async fn actualizar(&self, id: Uuid, request: EnvioRequest) -> AppResult<ApiResponse<Envio>> {
        Ok(self.service.actualizar(id, request).await?.into())
    }

    pub async fn obtener(&self, id: Uuid) -> AppResult<ApiResponse<Envio>> {
        Ok(ApiResponse::success(self.service.obtener(id).await?))
    }

    pub async fn cambiar_estado(
        &self,
        id: Uuid,
        request: CambiarEstadoEnvioRequest,
    ) -> AppResult<ApiResponse<Envio>> {
        let envio = self.service.cambiar_estado(id, &request.estado).await?;
        Ok(ApiResponse::success(envio))
    }

    pub async fn listar(&self, filters: EnvioFilters) -> AppResult<ApiResponse<Paginated<Envio>>> {
        Ok(ApiResponse::success(self.service.listar(&filters).await?))
    }

    pub async fn opciones_entrega(
        &self,
        request: OpcionesEntregaRequest,
    ) -> AppResult<ApiResponse<OpcionesEntregaResponse>> {
        Ok(self.opciones.sugerir(request).await?.into())
    }
}
