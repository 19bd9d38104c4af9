//! Cambio de estado de un reparto y cascada a sus envíos
//!
//! El estado del reparto manda: `asignado` deja los envíos en
//! `asignado_a_reparto`, `en_curso` en `en_transito` y `completado` en
//! `entregado`. Si falla la actualización de los envíos el reparto queda
//! actualizado igual y la respuesta lo informa como fallo parcial.

use std::sync::Arc;
use uuid::Uuid;

use crate::dto::reparto_dto::CambioEstadoReparto;
use crate::models::parada::TipoParada;
use crate::models::reparto::EstadoReparto;
use crate::services::reparto_store::RepartoStore;
use crate::services::unit_of_work::{Outcome, UnitOfWork};
use crate::utils::errors::{not_found_error, validation_error, AppResult};

pub struct EstadoRepartoService {
    store: Arc<dyn RepartoStore>,
}

impl EstadoRepartoService {
    pub fn new(store: Arc<dyn RepartoStore>) -> Self {
        Self { store }
    }

    /// `envio_ids` se aplica tal cual; si es `None` se toman de las paradas
    pub async fn cambiar_estado(
        &self,
        reparto_id: Uuid,
        estado: &str,
        envio_ids: Option<Vec<Uuid>>,
    ) -> AppResult<Outcome<CambioEstadoReparto>> {
        let estado: EstadoReparto = estado.parse().map_err(|e: String| validation_error("estado", e))?;

        self.store
            .find_reparto(reparto_id)
            .await?
            .ok_or_else(|| not_found_error("Reparto", reparto_id))?;

        let envio_ids = match envio_ids {
            Some(ids) => ids,
            None => self
                .store
                .list_paradas(reparto_id)
                .await?
                .into_iter()
                .filter(|p| p.tipo == TipoParada::EntregaCliente)
                .filter_map(|p| p.envio_id)
                .collect(),
        };

        let mut uow = UnitOfWork::begin("cambiar_estado_reparto");
        let reparto = uow
            .primary(
                "actualizar estado del reparto",
                self.store.update_reparto_estado(reparto_id, estado),
            )
            .await?;

        let estado_envios = estado.estado_envio_en_cascada();
        let envios_actualizados = if envio_ids.is_empty() {
            0
        } else {
            uow.or_partial(
                format!(
                    "El reparto pasó a '{}' pero no se pudo actualizar el estado de sus envíos a '{}'",
                    estado, estado_envios
                ),
                self.store.update_envios_estado(&envio_ids, estado_envios),
            )
            .await
            .unwrap_or(0)
        };

        log::info!(
            "🔄 Reparto {} -> {}; {} envíos -> {}",
            reparto_id,
            estado,
            envios_actualizados,
            estado_envios
        );

        Ok(uow.finish(CambioEstadoReparto {
            reparto,
            estado_envios,
            envios_actualizados,
        }))
    }
}
