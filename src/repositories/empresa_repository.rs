use sqlx::PgPool;
use uuid::Uuid;

use crate::models::empresa::{Empresa, EmpresaData};
use crate::utils::errors::{db_error, AppResult};
use crate::utils::pagination::PaginationParams;

pub struct EmpresaRepository {
    pool: PgPool,
}

impl EmpresaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &EmpresaData) -> AppResult<Empresa> {
        sqlx::query_as::<_, Empresa>(
            r#"
            INSERT INTO empresas (id, nombre, direccion, latitud, longitud, telefono, email, precio_por_envio, activo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.nombre)
        .bind(&data.direccion)
        .bind(data.latitud)
        .bind(data.longitud)
        .bind(&data.telefono)
        .bind(&data.email)
        .bind(data.precio_por_envio)
        .bind(data.activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error creando empresa", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Empresa>> {
        sqlx::query_as::<_, Empresa>("SELECT * FROM empresas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Error buscando empresa", e))
    }

    pub async fn update(&self, id: Uuid, data: &EmpresaData) -> AppResult<Option<Empresa>> {
        sqlx::query_as::<_, Empresa>(
            r#"
            UPDATE empresas
            SET nombre = $2, direccion = $3, latitud = $4, longitud = $5, telefono = $6,
                email = $7, precio_por_envio = $8, activo = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.nombre)
        .bind(&data.direccion)
        .bind(data.latitud)
        .bind(data.longitud)
        .bind(&data.telefono)
        .bind(&data.email)
        .bind(data.precio_por_envio)
        .bind(data.activo)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Error actualizando empresa", e))
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        activo: Option<bool>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Empresa>, i64)> {
        let empresas = sqlx::query_as::<_, Empresa>(
            r#"
            SELECT * FROM empresas
            WHERE ($1::text IS NULL OR nombre ILIKE $1 OR direccion ILIKE $1)
              AND ($2::bool IS NULL OR activo = $2)
            ORDER BY nombre
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search)
        .bind(activo)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Error listando empresas", e))?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM empresas
            WHERE ($1::text IS NULL OR nombre ILIKE $1 OR direccion ILIKE $1)
              AND ($2::bool IS NULL OR activo = $2)
            "#,
        )
        .bind(search)
        .bind(activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error contando empresas", e))?;

        Ok((empresas, total.0))
    }
}
