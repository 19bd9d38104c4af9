//! Acceso a datos del núcleo de repartos
//!
//! El constructor de repartos, el motor de orden de paradas y la cascada
//! de estados sólo hablan con este trait. La implementación de producción
//! es `PgRepartoStore`; los tests usan un store en memoria.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::cliente::Cliente;
use crate::models::empresa::Empresa;
use crate::models::envio::{Envio, EstadoEnvio, NuevoEnvio};
use crate::models::parada::{NuevaParada, ParadaReparto};
use crate::models::repartidor::Repartidor;
use crate::models::reparto::{EstadoReparto, NuevoReparto, Reparto};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait RepartoStore: Send + Sync {
    async fn find_repartidor(&self, id: Uuid) -> AppResult<Option<Repartidor>>;

    async fn find_empresa(&self, id: Uuid) -> AppResult<Option<Empresa>>;

    async fn find_cliente(&self, id: Uuid) -> AppResult<Option<Cliente>>;

    async fn find_reparto(&self, id: Uuid) -> AppResult<Option<Reparto>>;

    /// Inserta el reparto en estado `asignado`
    async fn insert_reparto(&self, nuevo: &NuevoReparto) -> AppResult<Reparto>;

    async fn update_reparto_estado(&self, id: Uuid, estado: EstadoReparto) -> AppResult<Reparto>;

    /// Envíos existentes entre `ids`; los inexistentes simplemente no aparecen
    async fn find_envios(&self, ids: &[Uuid]) -> AppResult<Vec<Envio>>;

    async fn insert_envio(&self, nuevo: &NuevoEnvio) -> AppResult<Envio>;

    /// Marca los envíos como `asignado_a_reparto` y los vincula al reparto
    async fn asignar_envios(&self, ids: &[Uuid], reparto_id: Uuid) -> AppResult<u64>;

    async fn update_envios_estado(&self, ids: &[Uuid], estado: EstadoEnvio) -> AppResult<u64>;

    /// Inserta todas las paradas o ninguna
    async fn insert_paradas(&self, paradas: &[NuevaParada]) -> AppResult<Vec<ParadaReparto>>;

    /// Paradas del reparto ordenadas por `orden`
    async fn list_paradas(&self, reparto_id: Uuid) -> AppResult<Vec<ParadaReparto>>;

    async fn update_parada_orden(&self, parada_id: Uuid, orden: i32) -> AppResult<()>;

    /// Aplica varios cambios de orden de forma atómica
    async fn commit_orden(&self, reparto_id: Uuid, cambios: &[(Uuid, i32)]) -> AppResult<()>;
}
