use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::cliente_dto::{ActualizarClienteRequest, ClienteFilters, CrearClienteRequest};
use crate::models::cliente::{Cliente, ClienteData};
use crate::repositories::cliente_repository::ClienteRepository;
use crate::repositories::empresa_repository::EmpresaRepository;
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::pagination::{search_pattern, Paginated};

pub struct ClienteController {
    repository: ClienteRepository,
    empresas: EmpresaRepository,
}

impl ClienteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClienteRepository::new(pool.clone()),
            empresas: EmpresaRepository::new(pool),
        }
    }

    async fn verificar_empresa(&self, empresa_id: Option<Uuid>) -> AppResult<()> {
        if let Some(id) = empresa_id {
            if self.empresas.find_by_id(id).await?.is_none() {
                return Err(validation_error(
                    "empresa_id",
                    format!("La empresa {} no existe", id),
                ));
            }
        }
        Ok(())
    }

    pub async fn crear(&self, request: CrearClienteRequest) -> AppResult<ApiResponse<Cliente>> {
        request.validate()?;
        self.verificar_empresa(request.empresa_id).await?;

        let data = ClienteData {
            empresa_id: request.empresa_id,
            nombre: request.nombre.trim().to_string(),
            apellido: request.apellido,
            direccion: request.direccion,
            latitud: request.latitud,
            longitud: request.longitud,
            telefono: request.telefono,
            email: request.email,
            notas: request.notas,
            activo: request.activo.unwrap_or(true),
        };

        let cliente = self.repository.create(&data).await?;
        log::info!("👤 Cliente creado: {} ({})", cliente.nombre_completo(), cliente.id);
        Ok(ApiResponse::success(cliente))
    }

    pub async fn obtener(&self, id: Uuid) -> AppResult<ApiResponse<Cliente>> {
        let cliente = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Cliente", id))?;
        Ok(ApiResponse::success(cliente))
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: ActualizarClienteRequest,
    ) -> AppResult<ApiResponse<Cliente>> {
        request.validate()?;
        self.verificar_empresa(request.empresa_id).await?;

        let actual = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Cliente", id))?;

        let data = ClienteData {
            empresa_id: request.empresa_id.or(actual.empresa_id),
            nombre: request
                .nombre
                .map(|n| n.trim().to_string())
                .unwrap_or(actual.nombre),
            apellido: request.apellido.or(actual.apellido),
            direccion: request.direccion.or(actual.direccion),
            latitud: request.latitud.or(actual.latitud),
            longitud: request.longitud.or(actual.longitud),
            telefono: request.telefono.or(actual.telefono),
            email: request.email.or(actual.email),
            notas: request.notas.or(actual.notas),
            activo: request.activo.unwrap_or(actual.activo),
        };

        let cliente = self
            .repository
            .update(id, &data)
            .await?
            .ok_or_else(|| not_found_error("Cliente", id))?;
        log::info!("👤 Cliente actualizado: {}", cliente.id);
        Ok(ApiResponse::success(cliente))
    }

    pub async fn listar(&self, filters: ClienteFilters) -> AppResult<ApiResponse<Paginated<Cliente>>> {
        let pagination = filters.pagination();
        let search = search_pattern(filters.search.as_deref());
        let (clientes, total) = self
            .repository
            .list(search.as_deref(), filters.activo, filters.empresa_id, pagination)
            .await?;
        Ok(ApiResponse::success(Paginated::new(clientes, total, pagination)))
    }
}
