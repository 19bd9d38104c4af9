use sqlx::PgPool;
use uuid::Uuid;

use crate::models::catalogo::{TipoPaquete, TipoPaqueteData, TipoServicio, TipoServicioData};
use crate::utils::errors::{db_error, AppResult};
use crate::utils::pagination::PaginationParams;

pub struct TipoPaqueteRepository {
    pool: PgPool,
}

impl TipoPaqueteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &TipoPaqueteData) -> AppResult<TipoPaquete> {
        sqlx::query_as::<_, TipoPaquete>(
            r#"
            INSERT INTO tipos_paquete (id, nombre, descripcion, dimensiones, peso_max_kg, activo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.nombre)
        .bind(&data.descripcion)
        .bind(&data.dimensiones)
        .bind(data.peso_max_kg)
        .bind(data.activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error creando tipo de paquete", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TipoPaquete>> {
        sqlx::query_as::<_, TipoPaquete>("SELECT * FROM tipos_paquete WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Error buscando tipo de paquete", e))
    }

    pub async fn update(&self, id: Uuid, data: &TipoPaqueteData) -> AppResult<Option<TipoPaquete>> {
        sqlx::query_as::<_, TipoPaquete>(
            r#"
            UPDATE tipos_paquete
            SET nombre = $2, descripcion = $3, dimensiones = $4, peso_max_kg = $5, activo = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.nombre)
        .bind(&data.descripcion)
        .bind(&data.dimensiones)
        .bind(data.peso_max_kg)
        .bind(data.activo)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Error actualizando tipo de paquete", e))
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        activo: Option<bool>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<TipoPaquete>, i64)> {
        let tipos = sqlx::query_as::<_, TipoPaquete>(
            r#"
            SELECT * FROM tipos_paquete
            WHERE ($1::text IS NULL OR nombre ILIKE $1 OR descripcion ILIKE $1)
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
        .map_err(|e| db_error("Error listando tipos de paquete", e))?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM tipos_paquete
            WHERE ($1::text IS NULL OR nombre ILIKE $1 OR descripcion ILIKE $1)
              AND ($2::bool IS NULL OR activo = $2)
            "#,
        )
        .bind(search)
        .bind(activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error contando tipos de paquete", e))?;

        Ok((tipos, total.0))
    }
}

pub struct TipoServicioRepository {
    pool: PgPool,
}

impl TipoServicioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &TipoServicioData) -> AppResult<TipoServicio> {
        sqlx::query_as::<_, TipoServicio>(
            r#"
            INSERT INTO tipos_servicio (id, nombre, descripcion, precio, tiempo_entrega_horas, activo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.nombre)
        .bind(&data.descripcion)
        .bind(data.precio)
        .bind(data.tiempo_entrega_horas)
        .bind(data.activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error creando tipo de servicio", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TipoServicio>> {
        sqlx::query_as::<_, TipoServicio>("SELECT * FROM tipos_servicio WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Error buscando tipo de servicio", e))
    }

    pub async fn update(&self, id: Uuid, data: &TipoServicioData) -> AppResult<Option<TipoServicio>> {
        sqlx::query_as::<_, TipoServicio>(
            r#"
            UPDATE tipos_servicio
            SET nombre = $2, descripcion = $3, precio = $4, tiempo_entrega_horas = $5, activo = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.nombre)
        .bind(&data.descripcion)
        .bind(data.precio)
        .bind(data.tiempo_entrega_horas)
        .bind(data.activo)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Error actualizando tipo de servicio", e))
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        activo: Option<bool>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<TipoServicio>, i64)> {
        let tipos = sqlx::query_as::<_, TipoServicio>(
            r#"
            SELECT * FROM tipos_servicio
            WHERE ($1::text IS NULL OR nombre ILIKE $1 OR descripcion ILIKE $1)
              AND ($2::bool IS NULL OR activo = $2)
            ORDER BY precio, nombre
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search)
        .bind(activo)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Error listando tipos de servicio", e))?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM tipos_servicio
            WHERE ($1::text IS NULL OR nombre ILIKE $1 OR descripcion ILIKE $1)
              AND ($2::bool IS NULL OR activo = $2)
            "#,
        )
        .bind(search)
        .bind(activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error contando tipos de servicio", e))?;

        Ok((tipos, total.0))
    }

    /// Catálogo activo completo, para ofrecer opciones de entrega
    pub async fn list_activos(&self) -> AppResult<Vec<TipoServicio>> {
        sqlx::query_as::<_, TipoServicio>(
            "SELECT * FROM tipos_servicio WHERE activo = TRUE ORDER BY precio, nombre",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Error listando servicios activos", e))
    }
}
