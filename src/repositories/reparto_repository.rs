use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::reparto::{EstadoReparto, NuevoReparto, Reparto};
use crate::utils::errors::{db_error, not_found_error, AppResult};
use crate::utils::pagination::PaginationParams;

pub struct RepartoRepository {
    pool: PgPool,
}

impl RepartoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, nuevo: &NuevoReparto) -> AppResult<Reparto> {
        sqlx::query_as::<_, Reparto>(
            r#"
            INSERT INTO repartos (id, fecha_reparto, repartidor_id, tipo, empresa_id, estado)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nuevo.fecha_reparto)
        .bind(nuevo.repartidor_id)
        .bind(nuevo.tipo)
        .bind(nuevo.empresa_id)
        .bind(EstadoReparto::Asignado)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error creando reparto", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reparto>> {
        sqlx::query_as::<_, Reparto>("SELECT * FROM repartos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Error buscando reparto", e))
    }

    pub async fn update_estado(&self, id: Uuid, estado: EstadoReparto) -> AppResult<Reparto> {
        sqlx::query_as::<_, Reparto>(
            "UPDATE repartos SET estado = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Error actualizando estado del reparto", e))?
        .ok_or_else(|| not_found_error("Reparto", id))
    }

    pub async fn list(
        &self,
        fecha: Option<NaiveDate>,
        estado: Option<EstadoReparto>,
        repartidor_id: Option<Uuid>,
        empresa_id: Option<Uuid>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Reparto>, i64)> {
        let repartos = sqlx::query_as::<_, Reparto>(
            r#"
            SELECT * FROM repartos
            WHERE ($1::date IS NULL OR fecha_reparto = $1)
              AND ($2::estado_reparto IS NULL OR estado = $2)
              AND ($3::uuid IS NULL OR repartidor_id = $3)
              AND ($4::uuid IS NULL OR empresa_id = $4)
            ORDER BY fecha_reparto DESC, created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(fecha)
        .bind(estado)
        .bind(repartidor_id)
        .bind(empresa_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Error listando repartos", e))?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM repartos
            WHERE ($1::date IS NULL OR fecha_reparto = $1)
              AND ($2::estado_reparto IS NULL OR estado = $2)
              AND ($3::uuid IS NULL OR repartidor_id = $3)
              AND ($4::uuid IS NULL OR empresa_id = $4)
            "#,
        )
        .bind(fecha)
        .bind(estado)
        .bind(repartidor_id)
        .bind(empresa_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error contando repartos", e))?;

        Ok((repartos, total.0))
    }
}
