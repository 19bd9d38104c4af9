use sqlx::PgPool;
use uuid::Uuid;

use crate::models::repartidor::{Repartidor, RepartidorData};
use crate::utils::errors::{db_error, AppResult};
use crate::utils::pagination::PaginationParams;

pub struct RepartidorRepository {
    pool: PgPool,
}

impl RepartidorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &RepartidorData) -> AppResult<Repartidor> {
        sqlx::query_as::<_, Repartidor>(
            r#"
            INSERT INTO repartidores (id, nombre, telefono, email, activo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.nombre)
        .bind(&data.telefono)
        .bind(&data.email)
        .bind(data.activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error creando repartidor", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Repartidor>> {
        sqlx::query_as::<_, Repartidor>("SELECT * FROM repartidores WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Error buscando repartidor", e))
    }

    pub async fn update(&self, id: Uuid, data: &RepartidorData) -> AppResult<Option<Repartidor>> {
        sqlx::query_as::<_, Repartidor>(
            r#"
            UPDATE repartidores
            SET nombre = $2, telefono = $3, email = $4, activo = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.nombre)
        .bind(&data.telefono)
        .bind(&data.email)
        .bind(data.activo)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Error actualizando repartidor", e))
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        activo: Option<bool>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Repartidor>, i64)> {
        let repartidores = sqlx::query_as::<_, Repartidor>(
            r#"
            SELECT * FROM repartidores
            WHERE ($1::text IS NULL OR nombre ILIKE $1)
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
        .map_err(|e| db_error("Error listando repartidores", e))?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM repartidores
            WHERE ($1::text IS NULL OR nombre ILIKE $1)
              AND ($2::bool IS NULL OR activo = $2)
            "#,
        )
        .bind(search)
        .bind(activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error contando repartidores", e))?;

        Ok((repartidores, total.0))
    }
}
