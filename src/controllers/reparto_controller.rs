use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::dto::reparto_dto::{
    AplicarOrdenRequest, CambiarEstadoRepartoRequest, CambioEstadoReparto,
    CrearRepartoLoteRequest, CrearRepartoRequest, MoverParadaRequest, MovimientoParada,
    RepartoCreado, RepartoDetalle, RepartoFilters,
};
use crate::dto::ruta_dto::RutaSugerida;
use crate::models::parada::ParadaReparto;
use crate::models::reparto::{EstadoReparto, Reparto};
use crate::repositories::reparto_repository::RepartoRepository;
use crate::services::estado_reparto_service::EstadoRepartoService;
use crate::services::parada_ordering::{parse_referencias, ParadaOrdering};
use crate::services::reparto_builder::RepartoBuilder;
use crate::services::reparto_query_service::RepartoQueryService;
use crate::services::route_suggestion_service::RutaService;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::pagination::Paginated;
use crate::utils::validation::non_blank;

pub struct RepartoController {
    repository: RepartoRepository,
    builder: RepartoBuilder,
    ordering: ParadaOrdering,
    estados: EstadoRepartoService,
    consultas: RepartoQueryService,
    rutas: RutaService,
}

impl RepartoController {
    pub fn new(state: &AppState) -> Self {
        let store = state.store();
        Self {
            repository: RepartoRepository::new(state.pool.clone()),
            builder: RepartoBuilder::new(store.clone()).with_geocoder(state.geocoder.clone()),
            ordering: ParadaOrdering::new(store.clone()),
            estados: EstadoRepartoService::new(store.clone()),
            consultas: RepartoQueryService::new(store.clone()),
            rutas: RutaService::new(store, state.route_suggester.clone()),
        }
    }

    pub async fn crear(&self, request: CrearRepartoRequest) -> AppResult<ApiResponse<RepartoCreado>> {
        Ok(self.builder.crear_reparto(request).await?.into())
    }

    pub async fn crear_lote(
        &self,
        request: CrearRepartoLoteRequest,
    ) -> AppResult<ApiResponse<RepartoCreado>> {
        Ok(self.builder.crear_reparto_lote(request).await?.into())
    }

    pub async fn detalle(&self, id: Uuid) -> AppResult<ApiResponse<RepartoDetalle>> {
        Ok(ApiResponse::success(self.consultas.detalle(id).await?))
    }

    pub async fn listar(&self, filters: RepartoFilters) -> AppResult<ApiResponse<Paginated<Reparto>>> {
        let estado = match non_blank(filters.estado.as_deref()) {
            Some(valor) => Some(
                valor
                    .parse::<EstadoReparto>()
                    .map_err(|e| validation_error("estado", e))?,
            ),
            None => None,
        };
        let pagination = filters.pagination();

        let (repartos, total) = self
            .repository
            .list(
                filters.fecha,
                estado,
                filters.repartidor_id,
                filters.empresa_id,
                pagination,
            )
            .await?;
        Ok(ApiResponse::success(Paginated::new(repartos, total, pagination)))
    }

    pub async fn cambiar_estado(
        &self,
        id: Uuid,
        request: CambiarEstadoRepartoRequest,
    ) -> AppResult<ApiResponse<CambioEstadoReparto>> {
        let outcome = self
            .estados
            .cambiar_estado(id, &request.estado, request.envio_ids)
            .await?;
        Ok(outcome.into())
    }

    pub async fn mover_parada(
        &self,
        id: Uuid,
        parada_id: Uuid,
        request: MoverParadaRequest,
    ) -> AppResult<ApiResponse<MovimientoParada>> {
        let movimiento = self
            .ordering
            .mover_parada(id, parada_id, request.direccion)
            .await?;
        Ok(if movimiento.movida {
            ApiResponse::success(movimiento)
        } else {
            ApiResponse::success_with_info(movimiento, "La parada ya está en el extremo del recorrido")
        })
    }

    pub async fn aplicar_orden(
        &self,
        id: Uuid,
        request: AplicarOrdenRequest,
    ) -> AppResult<ApiResponse<Vec<ParadaReparto>>> {
        let referencias = parse_referencias(&request.orden)?;
        let paradas = self.ordering.aplicar_orden(id, &referencias).await?;
        Ok(ApiResponse::success(paradas))
    }

    pub async fn sugerir_ruta(&self, id: Uuid) -> AppResult<ApiResponse<RutaSugerida>> {
        Ok(self.rutas.sugerir_ruta(id).await?.into())
    }
}
