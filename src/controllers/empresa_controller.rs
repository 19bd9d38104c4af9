use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::empresa_dto::{ActualizarEmpresaRequest, CrearEmpresaRequest, EmpresaFilters};
use crate::models::empresa::{Empresa, EmpresaData};
use crate::repositories::empresa_repository::EmpresaRepository;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::pagination::{search_pattern, Paginated};

pub struct EmpresaController {
    repository: EmpresaRepository,
}

impl EmpresaController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EmpresaRepository::new(pool),
        }
    }

    pub async fn crear(&self, request: CrearEmpresaRequest) -> AppResult<ApiResponse<Empresa>> {
        request.validate()?;

        let data = EmpresaData {
            nombre: request.nombre.trim().to_string(),
            direccion: request.direccion,
            latitud: request.latitud,
            longitud: request.longitud,
            telefono: request.telefono,
            email: request.email,
            precio_por_envio: request.precio_por_envio,
            activo: request.activo.unwrap_or(true),
        };

        let empresa = self.repository.create(&data).await?;
        log::info!("🏢 Empresa creada: {} ({})", empresa.nombre, empresa.id);

        let info = match empresa.punto_retiro() {
            Some(_) => None,
            None => Some("La empresa no tiene punto de retiro: faltan dirección o coordenadas"),
        };
        Ok(match info {
            Some(info) => ApiResponse::success_with_info(empresa, info),
            None => ApiResponse::success(empresa),
        })
    }

    pub async fn obtener(&self, id: Uuid) -> AppResult<ApiResponse<Empresa>> {
        let empresa = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Empresa", id))?;
        Ok(ApiResponse::success(empresa))
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: ActualizarEmpresaRequest,
    ) -> AppResult<ApiResponse<Empresa>> {
        request.validate()?;

        let actual = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Empresa", id))?;

        // Los campos ausentes conservan su valor
        let data = EmpresaData {
            nombre: request
                .nombre
                .map(|n| n.trim().to_string())
                .unwrap_or(actual.nombre),
            direccion: request.direccion.or(actual.direccion),
            latitud: request.latitud.or(actual.latitud),
            longitud: request.longitud.or(actual.longitud),
            telefono: request.telefono.or(actual.telefono),
            email: request.email.or(actual.email),
            precio_por_envio: request.precio_por_envio.or(actual.precio_por_envio),
            activo: request.activo.unwrap_or(actual.activo),
        };

        let empresa = self
            .repository
            .update(id, &data)
            .await?
            .ok_or_else(|| not_found_error("Empresa", id))?;
        log::info!("🏢 Empresa actualizada: {}", empresa.id);
        Ok(ApiResponse::success(empresa))
    }

    pub async fn listar(&self, filters: EmpresaFilters) -> AppResult<ApiResponse<Paginated<Empresa>>> {
        let pagination = filters.pagination();
        let search = search_pattern(filters.search.as_deref());
        let (empresas, total) = self
            .repository
            .list(search.as_deref(), filters.activo, pagination)
            .await?;
        Ok(ApiResponse::success(Paginated::new(empresas, total, pagination)))
    }
}
