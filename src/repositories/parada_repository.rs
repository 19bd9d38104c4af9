use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::parada::{NuevaParada, ParadaReparto};
use crate::utils::errors::{db_error, AppError, AppResult};

pub struct ParadaRepository {
    pool: PgPool,
}

impl ParadaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta todas las paradas en una sola sentencia
    pub async fn insert_many(&self, paradas: &[NuevaParada]) -> AppResult<Vec<ParadaReparto>> {
        if paradas.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO paradas_reparto (id, reparto_id, tipo, envio_id, orden) ");
        builder.push_values(paradas, |mut row, parada| {
            row.push_bind(Uuid::new_v4())
                .push_bind(parada.reparto_id)
                .push_bind(parada.tipo)
                .push_bind(parada.envio_id)
                .push_bind(parada.orden);
        });
        builder.push(" RETURNING *");

        let mut creadas = builder
            .build_query_as::<ParadaReparto>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Error creando paradas", e))?;

        creadas.sort_by_key(|p| p.orden);
        Ok(creadas)
    }

    pub async fn list_by_reparto(&self, reparto_id: Uuid) -> AppResult<Vec<ParadaReparto>> {
        sqlx::query_as::<_, ParadaReparto>(
            "SELECT * FROM paradas_reparto WHERE reparto_id = $1 ORDER BY orden, created_at",
        )
        .bind(reparto_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Error listando paradas", e))
    }

    pub async fn update_orden(&self, parada_id: Uuid, orden: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE paradas_reparto SET orden = $2 WHERE id = $1")
            .bind(parada_id)
            .bind(orden)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Error actualizando orden de parada", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Parada con id '{}' no encontrada", parada_id)));
        }
        Ok(())
    }

    /// Aplica todos los cambios de orden o ninguno
    pub async fn apply_orders(&self, reparto_id: Uuid, cambios: &[(Uuid, i32)]) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Error iniciando transacción", e))?;

        for (parada_id, orden) in cambios {
            let result = sqlx::query(
                "UPDATE paradas_reparto SET orden = $3 WHERE id = $1 AND reparto_id = $2",
            )
            .bind(parada_id)
            .bind(reparto_id)
            .bind(orden)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Error aplicando orden de paradas", e))?;

            if result.rows_affected() == 0 {
                // El drop de `tx` hace rollback
                return Err(AppError::NotFound(format!(
                    "La parada '{}' ya no pertenece al reparto",
                    parada_id
                )));
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Error confirmando orden de paradas", e))
    }
}
