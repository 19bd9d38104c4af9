//! Orden de paradas de un reparto
//!
//! Las posiciones `orden` de un reparto forman siempre `0..N`. Las dos
//! operaciones de este módulo preservan ese invariante:
//!
//! * `mover_parada` intercambia una parada con su vecina. Son dos
//!   escrituras separadas; si la segunda falla se intenta deshacer la
//!   primera. Dos movimientos concurrentes sobre el mismo reparto pueden
//!   pisarse.
//! * `aplicar_orden` resuelve todas las referencias, valida el orden
//!   resultante completo y recién entonces escribe, en una transacción.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::reparto_dto::MovimientoParada;
use crate::models::parada::{DireccionMovimiento, ParadaRef, ParadaReparto, TipoParada};
use crate::services::reparto_store::RepartoStore;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

/// Intercambio planificado entre dos paradas vecinas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intercambio {
    pub parada: (Uuid, i32),
    pub vecina: (Uuid, i32),
}

/// Planificar el intercambio; `None` si la parada ya está en el extremo
pub fn plan_intercambio(
    paradas: &[ParadaReparto],
    parada_id: Uuid,
    direccion: DireccionMovimiento,
) -> AppResult<Option<Intercambio>> {
    let index = paradas
        .iter()
        .position(|p| p.id == parada_id)
        .ok_or_else(|| not_found_error("Parada", parada_id))?;

    let vecina = match direccion {
        DireccionMovimiento::Arriba if index == 0 => return Ok(None),
        DireccionMovimiento::Arriba => index - 1,
        DireccionMovimiento::Abajo if index + 1 >= paradas.len() => return Ok(None),
        DireccionMovimiento::Abajo => index + 1,
    };

    Ok(Some(Intercambio {
        parada: (paradas[index].id, paradas[index].orden),
        vecina: (paradas[vecina].id, paradas[vecina].orden),
    }))
}

/// `true` si los valores son exactamente `0..N` sin repetir
pub fn es_contiguo(ordenes: impl IntoIterator<Item = i32>) -> bool {
    let mut valores: Vec<i32> = ordenes.into_iter().collect();
    valores.sort_unstable();
    valores.iter().enumerate().all(|(i, v)| *v == i as i32)
}

/// Resolver una referencia a la parada del reparto que designa
fn resolver<'a>(paradas: &'a [ParadaReparto], referencia: &ParadaRef) -> AppResult<&'a ParadaReparto> {
    let encontrada = match referencia {
        ParadaRef::RetiroEmpresa { .. } => paradas.iter().find(|p| p.tipo == TipoParada::RetiroEmpresa),
        ParadaRef::Id(id) => paradas
            .iter()
            .find(|p| p.id == *id)
            .or_else(|| paradas.iter().find(|p| p.envio_id == Some(*id))),
    };

    encontrada.ok_or_else(|| {
        validation_error(
            "orden",
            format!("La referencia '{}' no corresponde a ninguna parada del reparto", referencia),
        )
    })
}

/// Calcular los cambios de `orden` que produce una lista de referencias.
///
/// La referencia en la posición `i` recibe `orden = i`; las paradas no
/// mencionadas conservan su valor. Devuelve sólo las paradas que cambian.
pub fn plan_orden(paradas: &[ParadaReparto], referencias: &[ParadaRef]) -> AppResult<Vec<(Uuid, i32)>> {
    if referencias.is_empty() {
        return Err(validation_error("orden", "La lista de paradas está vacía"));
    }

    let mut propuestas: HashMap<Uuid, i32> = paradas.iter().map(|p| (p.id, p.orden)).collect();
    let mut vistas = HashSet::new();

    for (posicion, referencia) in referencias.iter().enumerate() {
        let parada = resolver(paradas, referencia)?;
        if !vistas.insert(parada.id) {
            return Err(validation_error(
                "orden",
                format!("La parada '{}' aparece más de una vez", referencia),
            ));
        }
        propuestas.insert(parada.id, posicion as i32);
    }

    if !es_contiguo(propuestas.values().copied()) {
        return Err(validation_error(
            "orden",
            "El orden propuesto deja posiciones repetidas o vacías; incluya todas las paradas del reparto",
        ));
    }

    Ok(paradas
        .iter()
        .filter_map(|p| {
            let nuevo = propuestas.get(&p.id).copied().unwrap_or(p.orden);
            (nuevo != p.orden).then_some((p.id, nuevo))
        })
        .collect())
}

fn aplicar_local(paradas: &mut [ParadaReparto], cambios: &[(Uuid, i32)]) {
    for (id, orden) in cambios {
        if let Some(parada) = paradas.iter_mut().find(|p| p.id == *id) {
            parada.orden = *orden;
        }
    }
    paradas.sort_by_key(|p| p.orden);
}

pub struct ParadaOrdering {
    store: Arc<dyn RepartoStore>,
}

impl ParadaOrdering {
    pub fn new(store: Arc<dyn RepartoStore>) -> Self {
        Self { store }
    }

    async fn cargar_paradas(&self, reparto_id: Uuid) -> AppResult<Vec<ParadaReparto>> {
        self.store
            .find_reparto(reparto_id)
            .await?
            .ok_or_else(|| not_found_error("Reparto", reparto_id))?;
        self.store.list_paradas(reparto_id).await
    }

    /// Mover una parada una posición hacia arriba o hacia abajo
    pub async fn mover_parada(
        &self,
        reparto_id: Uuid,
        parada_id: Uuid,
        direccion: DireccionMovimiento,
    ) -> AppResult<MovimientoParada> {
        let mut paradas = self.cargar_paradas(reparto_id).await?;

        let Some(intercambio) = plan_intercambio(&paradas, parada_id, direccion)? else {
            log::info!("↕️ Parada {} ya está en el extremo; sin cambios", parada_id);
            return Ok(MovimientoParada { movida: false, paradas });
        };

        let (id, orden_original) = intercambio.parada;
        let (vecina_id, orden_vecina) = intercambio.vecina;

        self.store.update_parada_orden(id, orden_vecina).await?;

        if let Err(e) = self.store.update_parada_orden(vecina_id, orden_original).await {
            log::error!("❌ Falló el segundo paso del intercambio de {}: {}", parada_id, e);
            if let Err(rollback) = self.store.update_parada_orden(id, orden_original).await {
                log::error!(
                    "❌ No se pudo restaurar la parada {} a la posición {}: {}",
                    id,
                    orden_original,
                    rollback
                );
                return Err(AppError::Internal(format!(
                    "El orden del reparto {} quedó inconsistente: {}",
                    reparto_id, rollback
                )));
            }
            return Err(e);
        }

        aplicar_local(&mut paradas, &[(id, orden_vecina), (vecina_id, orden_original)]);
        log::info!("↕️ Parada {} movida a la posición {}", parada_id, orden_vecina);

        Ok(MovimientoParada { movida: true, paradas })
    }

    /// Aplicar un orden externo (manual o sugerido)
    pub async fn aplicar_orden(
        &self,
        reparto_id: Uuid,
        referencias: &[ParadaRef],
    ) -> AppResult<Vec<ParadaReparto>> {
        let mut paradas = self.cargar_paradas(reparto_id).await?;
        let cambios = plan_orden(&paradas, referencias)?;

        if cambios.is_empty() {
            log::info!("📋 Orden del reparto {} sin cambios", reparto_id);
            return Ok(paradas);
        }

        self.store.commit_orden(reparto_id, &cambios).await?;
        aplicar_local(&mut paradas, &cambios);

        log::info!(
            "📋 Orden aplicado al reparto {}: {} paradas cambiaron de posición",
            reparto_id,
            cambios.len()
        );
        Ok(paradas)
    }
}

/// Parsear las referencias crudas de un request
pub fn parse_referencias(valores: &[String]) -> AppResult<Vec<ParadaRef>> {
    valores
        .iter()
        .map(|v| v.parse::<ParadaRef>().map_err(|e| validation_error("orden", e)))
        .collect()
}
