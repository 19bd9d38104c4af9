use sqlx::PgPool;
use uuid::Uuid;

use crate::models::envio::{Envio, EstadoEnvio, NuevoEnvio};
use crate::utils::errors::{db_error, AppResult};
use crate::utils::pagination::PaginationParams;

pub struct EnvioRepository {
    pool: PgPool,
}

impl EnvioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, envio: &NuevoEnvio) -> AppResult<Envio> {
        sqlx::query_as::<_, Envio>(
            r#"
            INSERT INTO envios (
                id, cliente_id, nombre_cliente_temporal, direccion_destino, latitud_destino,
                longitud_destino, tipo_paquete_id, peso_kg, tipo_servicio_id, precio_final,
                estado, reparto_id, notas
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(envio.cliente_id)
        .bind(&envio.nombre_cliente_temporal)
        .bind(&envio.direccion_destino)
        .bind(envio.coordenadas.map(|c| c.lat))
        .bind(envio.coordenadas.map(|c| c.lng))
        .bind(envio.tipo_paquete_id)
        .bind(envio.peso_kg)
        .bind(envio.tipo_servicio_id)
        .bind(envio.precio_final)
        .bind(envio.estado)
        .bind(envio.reparto_id)
        .bind(&envio.notas)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error creando envío", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Envio>> {
        sqlx::query_as::<_, Envio>("SELECT * FROM envios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Error buscando envío", e))
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Envio>> {
        sqlx::query_as::<_, Envio>("SELECT * FROM envios WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Error buscando envíos", e))
    }

    /// Actualiza los datos editables; estado y reparto no cambian aquí
    pub async fn update(&self, id: Uuid, envio: &NuevoEnvio) -> AppResult<Option<Envio>> {
        sqlx::query_as::<_, Envio>(
            r#"
            UPDATE envios
            SET cliente_id = $2, nombre_cliente_temporal = $3, direccion_destino = $4,
                latitud_destino = $5, longitud_destino = $6, tipo_paquete_id = $7, peso_kg = $8,
                tipo_servicio_id = $9, precio_final = $10, notas = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(envio.cliente_id)
        .bind(&envio.nombre_cliente_temporal)
        .bind(&envio.direccion_destino)
        .bind(envio.coordenadas.map(|c| c.lat))
        .bind(envio.coordenadas.map(|c| c.lng))
        .bind(envio.tipo_paquete_id)
        .bind(envio.peso_kg)
        .bind(envio.tipo_servicio_id)
        .bind(envio.precio_final)
        .bind(&envio.notas)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Error actualizando envío", e))
    }

    pub async fn update_estado(&self, id: Uuid, estado: EstadoEnvio) -> AppResult<Option<Envio>> {
        sqlx::query_as::<_, Envio>(
            "UPDATE envios SET estado = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Error actualizando estado del envío", e))
    }

    pub async fn update_estado_many(&self, ids: &[Uuid], estado: EstadoEnvio) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE envios SET estado = $2, updated_at = NOW() WHERE id = ANY($1)",
        )
        .bind(ids.to_vec())
        .bind(estado)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Error actualizando estado de envíos", e))?;

        Ok(result.rows_affected())
    }

    pub async fn asignar_a_reparto(&self, ids: &[Uuid], reparto_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE envios
            SET estado = $2, reparto_id = $3, updated_at = NOW()
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids.to_vec())
        .bind(EstadoEnvio::AsignadoAReparto)
        .bind(reparto_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Error asignando envíos al reparto", e))?;

        Ok(result.rows_affected())
    }

    pub async fn list(
        &self,
        estado: Option<EstadoEnvio>,
        reparto_id: Option<Uuid>,
        cliente_id: Option<Uuid>,
        search: Option<&str>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Envio>, i64)> {
        let envios = sqlx::query_as::<_, Envio>(
            r#"
            SELECT e.* FROM envios e
            LEFT JOIN clientes c ON c.id = e.cliente_id
            WHERE ($1::estado_envio IS NULL OR e.estado = $1)
              AND ($2::uuid IS NULL OR e.reparto_id = $2)
              AND ($3::uuid IS NULL OR e.cliente_id = $3)
              AND ($4::text IS NULL
                   OR e.direccion_destino ILIKE $4
                   OR e.nombre_cliente_temporal ILIKE $4
                   OR c.nombre ILIKE $4
                   OR c.apellido ILIKE $4)
            ORDER BY e.created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(estado)
        .bind(reparto_id)
        .bind(cliente_id)
        .bind(search)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Error listando envíos", e))?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM envios e
            LEFT JOIN clientes c ON c.id = e.cliente_id
            WHERE ($1::estado_envio IS NULL OR e.estado = $1)
              AND ($2::uuid IS NULL OR e.reparto_id = $2)
              AND ($3::uuid IS NULL OR e.cliente_id = $3)
              AND ($4::text IS NULL
                   OR e.direccion_destino ILIKE $4
                   OR e.nombre_cliente_temporal ILIKE $4
                   OR c.nombre ILIKE $4
                   OR c.apellido ILIKE $4)
            "#,
        )
        .bind(estado)
        .bind(reparto_id)
        .bind(cliente_id)
        .bind(search)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Error contando envíos", e))?;

        Ok((envios, total.0))
    }
}
