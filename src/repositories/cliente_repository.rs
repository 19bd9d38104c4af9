use sqlx::PgPool;
use uuid::Uuid;

use crate::models::cliente::{Cliente, ClienteData};
use crate::utils::errors::{db_error, AppResult};
use crate::utils::pagination::PaginationParams;

pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &ClienteData) -> AppResult<Cliente> {
        sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (id, empresa_id, nombre, apellido, direccion, latitud, longitud, telefono, email, notas, activo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.empresa_id)
        .bind(&data.nombre)
        .bind(&data.apellido)
        .bind(&data.direccion)
        .bind(data.latitud)
        .bind(data.longitud)
        .bind(&data.telefono)
        .bind(&data.email)
        .bind(&data.notas)
        .bind(data.activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error creando cliente", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Cliente>> {
        sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Error buscando cliente", e))
    }

    pub async fn update(&self, id: Uuid, data: &ClienteData) -> AppResult<Option<Cliente>> {
        sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes
            SET empresa_id = $2, nombre = $3, apellido = $4, direccion = $5, latitud = $6,
                longitud = $7, telefono = $8, email = $9, notas = $10, activo = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.empresa_id)
        .bind(&data.nombre)
        .bind(&data.apellido)
        .bind(&data.direccion)
        .bind(data.latitud)
        .bind(data.longitud)
        .bind(&data.telefono)
        .bind(&data.email)
        .bind(&data.notas)
        .bind(data.activo)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Error actualizando cliente", e))
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        activo: Option<bool>,
        empresa_id: Option<Uuid>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Cliente>, i64)> {
        let clientes = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT * FROM clientes
            WHERE ($1::text IS NULL OR nombre ILIKE $1 OR apellido ILIKE $1 OR direccion ILIKE $1)
              AND ($2::bool IS NULL OR activo = $2)
              AND ($3::uuid IS NULL OR empresa_id = $3)
            ORDER BY nombre, apellido
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(search)
        .bind(activo)
        .bind(empresa_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Error listando clientes", e))?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM clientes
            WHERE ($1::text IS NULL OR nombre ILIKE $1 OR apellido ILIKE $1 OR direccion ILIKE $1)
              AND ($2::bool IS NULL OR activo = $2)
              AND ($3::uuid IS NULL OR empresa_id = $3)
            "#,
        )
        .bind(search)
        .bind(activo)
        .bind(empresa_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error contando clientes", e))?;

        Ok((clientes, total.0))
    }
}
