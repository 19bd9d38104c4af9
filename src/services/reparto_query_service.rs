//! Lectura del detalle de un reparto
//!
//! Carga el reparto con sus paradas en orden y, para cada parada, la
//! dirección y coordenadas que la ubican. Las lecturas independientes se
//! hacen en paralelo.

use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::reparto_dto::{ParadaDetalle, RepartoDetalle};
use crate::models::cliente::Cliente;
use crate::models::empresa::Empresa;
use crate::models::envio::Envio;
use crate::models::parada::{ParadaReparto, TipoParada};
use crate::services::reparto_store::RepartoStore;
use crate::utils::errors::{not_found_error, AppResult};

pub struct RepartoQueryService {
    store: Arc<dyn RepartoStore>,
}

impl RepartoQueryService {
    pub fn new(store: Arc<dyn RepartoStore>) -> Self {
        Self { store }
    }

    pub async fn detalle(&self, reparto_id: Uuid) -> AppResult<RepartoDetalle> {
        let store = self.store.as_ref();
        let reparto = store
            .find_reparto(reparto_id)
            .await?
            .ok_or_else(|| not_found_error("Reparto", reparto_id))?;

        let empresa = async {
            match reparto.empresa_id {
                Some(id) => store.find_empresa(id).await,
                None => Ok(None),
            }
        };
        let (repartidor, empresa, paradas) = futures::try_join!(
            store.find_repartidor(reparto.repartidor_id),
            empresa,
            store.list_paradas(reparto.id)
        )?;

        let envio_ids: Vec<Uuid> = paradas.iter().filter_map(|p| p.envio_id).collect();
        let envios: HashMap<Uuid, Envio> = if envio_ids.is_empty() {
            HashMap::new()
        } else {
            store
                .find_envios(&envio_ids)
                .await?
                .into_iter()
                .map(|e| (e.id, e))
                .collect()
        };

        let mut cliente_ids: Vec<Uuid> = envios.values().filter_map(|e| e.cliente_id).collect();
        cliente_ids.sort();
        cliente_ids.dedup();
        let clientes: HashMap<Uuid, Cliente> =
            try_join_all(cliente_ids.iter().map(|id| store.find_cliente(*id)))
                .await?
                .into_iter()
                .flatten()
                .map(|c| (c.id, c))
                .collect();

        let paradas = paradas
            .into_iter()
            .map(|parada| detallar(parada, empresa.as_ref(), &envios, &clientes))
            .collect();

        Ok(RepartoDetalle {
            reparto,
            repartidor,
            empresa,
            paradas,
        })
    }
}

fn detallar(
    parada: ParadaReparto,
    empresa: Option<&Empresa>,
    envios: &HashMap<Uuid, Envio>,
    clientes: &HashMap<Uuid, Cliente>,
) -> ParadaDetalle {
    match parada.tipo {
        TipoParada::RetiroEmpresa => ParadaDetalle {
            nombre: empresa.map(|e| e.nombre.clone()),
            direccion: empresa.and_then(|e| e.direccion.clone()),
            coordenadas: empresa.and_then(|e| e.coordenadas()),
            envio: None,
            parada,
        },
        TipoParada::EntregaCliente => {
            let envio = parada.envio_id.and_then(|id| envios.get(&id)).cloned();
            let nombre = envio.as_ref().and_then(|e| {
                e.cliente_id
                    .and_then(|id| clientes.get(&id))
                    .map(Cliente::nombre_completo)
                    .or_else(|| e.nombre_cliente_temporal.clone())
            });
            ParadaDetalle {
                nombre,
                direccion: envio.as_ref().map(|e| e.direccion_destino.clone()),
                coordenadas: envio.as_ref().and_then(Envio::coordenadas),
                envio,
                parada,
            }
        }
    }
}
