use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::repartidor_dto::{
    ActualizarRepartidorRequest, CrearRepartidorRequest, RepartidorFilters,
};
use crate::models::repartidor::{Repartidor, RepartidorData};
use crate::repositories::repartidor_repository::RepartidorRepository;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::pagination::{search_pattern, Paginated};

pub struct RepartidorController {
    repository: RepartidorRepository,
}

impl RepartidorController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RepartidorRepository::new(pool),
        }
    }

    pub async fn crear(&self, request: CrearRepartidorRequest) -> AppResult<ApiResponse<Repartidor>> {
        request.validate()?;

        let data = RepartidorData {
            nombre: request.nombre.trim().to_string(),
            telefono: request.telefono,
            email: request.email,
            activo: request.activo.unwrap_or(true),
        };

        let repartidor = self.repository.create(&data).await?;
        log::info!("🚚 Repartidor creado: {} ({})", repartidor.nombre, repartidor.id);
        Ok(ApiResponse::success(repartidor))
    }

    pub async fn obtener(&self, id: Uuid) -> AppResult<ApiResponse<Repartidor>> {
        let repartidor = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Repartidor", id))?;
        Ok(ApiResponse::success(repartidor))
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: ActualizarRepartidorRequest,
    ) -> AppResult<ApiResponse<Repartidor>> {
        request.validate()?;

        let actual = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Repartidor", id))?;

        let data = RepartidorData {
            nombre: request
                .nombre
                .map(|n| n.trim().to_string())
                .unwrap_or(actual.nombre),
            telefono: request.telefono.or(actual.telefono),
            email: request.email.or(actual.email),
            activo: request.activo.unwrap_or(actual.activo),
        };

        let repartidor = self
            .repository
            .update(id, &data)
            .await?
            .ok_or_else(|| not_found_error("Repartidor", id))?;
        Ok(ApiResponse::success(repartidor))
    }

    pub async fn listar(
        &self,
        filters: RepartidorFilters,
    ) -> AppResult<ApiResponse<Paginated<Repartidor>>> {
        let pagination = filters.pagination();
        let search = search_pattern(filters.search.as_deref());
        let (repartidores, total) = self
            .repository
            .list(search.as_deref(), filters.activo, pagination)
            .await?;
        Ok(ApiResponse::success(Paginated::new(repartidores, total, pagination)))
    }
}
