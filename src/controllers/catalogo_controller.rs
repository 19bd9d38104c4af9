//! Catálogos: tipos de paquete y tipos de servicio

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::catalogo_dto::{
    ActualizarTipoPaqueteRequest, ActualizarTipoServicioRequest, CatalogoFilters,
    CrearTipoPaqueteRequest, CrearTipoServicioRequest,
};
use crate::models::catalogo::{TipoPaquete, TipoPaqueteData, TipoServicio, TipoServicioData};
use crate::repositories::catalogo_repository::{TipoPaqueteRepository, TipoServicioRepository};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::pagination::{search_pattern, Paginated};

pub struct TipoPaqueteController {
    repository: TipoPaqueteRepository,
}

impl TipoPaqueteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TipoPaqueteRepository::new(pool),
        }
    }

    pub async fn crear(&self, request: CrearTipoPaqueteRequest) -> AppResult<ApiResponse<TipoPaquete>> {
        request.validate()?;

        let data = TipoPaqueteData {
            nombre: request.nombre.trim().to_string(),
            descripcion: request.descripcion,
            dimensiones: request.dimensiones,
            peso_max_kg: request.peso_max_kg,
            activo: request.activo.unwrap_or(true),
        };

        let tipo = self.repository.create(&data).await?;
        log::info!("📦 Tipo de paquete creado: {}", tipo.nombre);
        Ok(ApiResponse::success(tipo))
    }

    pub async fn obtener(&self, id: Uuid) -> AppResult<ApiResponse<TipoPaquete>> {
        let tipo = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Tipo de paquete", id))?;
        Ok(ApiResponse::success(tipo))
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: ActualizarTipoPaqueteRequest,
    ) -> AppResult<ApiResponse<TipoPaquete>> {
        request.validate()?;

        let actual = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Tipo de paquete", id))?;

        let data = TipoPaqueteData {
            nombre: request
                .nombre
                .map(|n| n.trim().to_string())
                .unwrap_or(actual.nombre),
            descripcion: request.descripcion.or(actual.descripcion),
            dimensiones: request.dimensiones.or(actual.dimensiones),
            peso_max_kg: request.peso_max_kg.or(actual.peso_max_kg),
            activo: request.activo.unwrap_or(actual.activo),
        };

        let tipo = self
            .repository
            .update(id, &data)
            .await?
            .ok_or_else(|| not_found_error("Tipo de paquete", id))?;
        Ok(ApiResponse::success(tipo))
    }

    pub async fn listar(&self, filters: CatalogoFilters) -> AppResult<ApiResponse<Paginated<TipoPaquete>>> {
        let pagination = filters.pagination();
        let search = search_pattern(filters.search.as_deref());
        let (tipos, total) = self
            .repository
            .list(search.as_deref(), filters.activo, pagination)
            .await?;
        Ok(ApiResponse::success(Paginated::new(tipos, total, pagination)))
    }
}

pub struct TipoServicioController {
    repository: TipoServicioRepository,
}

impl TipoServicioController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TipoServicioRepository::new(pool),
        }
    }

    pub async fn crear(&self, request: CrearTipoServicioRequest) -> AppResult<ApiResponse<TipoServicio>> {
        request.validate()?;

        let data = TipoServicioData {
            nombre: request.nombre.trim().to_string(),
            descripcion: request.descripcion,
            precio: request.precio,
            tiempo_entrega_horas: request.tiempo_entrega_horas,
            activo: request.activo.unwrap_or(true),
        };

        let tipo = self.repository.create(&data).await?;
        log::info!("💲 Tipo de servicio creado: {} ({})", tipo.nombre, tipo.precio);
        Ok(ApiResponse::success(tipo))
    }

    pub async fn obtener(&self, id: Uuid) -> AppResult<ApiResponse<TipoServicio>> {
        let tipo = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Tipo de servicio", id))?;
        Ok(ApiResponse::success(tipo))
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: ActualizarTipoServicioRequest,
    ) -> AppResult<ApiResponse<TipoServicio>> {
        request.validate()?;

        let actual = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Tipo de servicio", id))?;

        let data = TipoServicioData {
            nombre: request
                .nombre
                .map(|n| n.trim().to_string())
                .unwrap_or(actual.nombre),
            descripcion: request.descripcion.or(actual.descripcion),
            precio: request.precio.unwrap_or(actual.precio),
            tiempo_entrega_horas: request.tiempo_entrega_horas.or(actual.tiempo_entrega_horas),
            activo: request.activo.unwrap_or(actual.activo),
        };

        let tipo = self
            .repository
            .update(id, &data)
            .await?
            .ok_or_else(|| not_found_error("Tipo de servicio", id))?;
        Ok(ApiResponse::success(tipo))
    }

    pub async fn listar(&self, filters: CatalogoFilters) -> AppResult<ApiResponse<Paginated<TipoServicio>>> {
        let pagination = filters.pagination();
        let search = search_pattern(filters.search.as_deref());
        let (tipos, total) = self
            .repository
            .list(search.as_deref(), filters.activo, pagination)
            .await?;
        Ok(ApiResponse::success(Paginated::new(tipos, total, pagination)))
    }
}
