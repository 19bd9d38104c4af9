//! `RepartoStore` sobre PostgreSQL

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::cliente::Cliente;
use crate::models::empresa::Empresa;
use crate::models::envio::{Envio, EstadoEnvio, NuevoEnvio};
use crate::models::parada::{NuevaParada, ParadaReparto};
use crate::models::repartidor::Repartidor;
use crate::models::reparto::{EstadoReparto, NuevoReparto, Reparto};
use crate::repositories::cliente_repository::ClienteRepository;
use crate::repositories::empresa_repository::EmpresaRepository;
use crate::repositories::envio_repository::EnvioRepository;
use crate::repositories::parada_repository::ParadaRepository;
use crate::repositories::repartidor_repository::RepartidorRepository;
use crate::repositories::reparto_repository::RepartoRepository;
use crate::services::reparto_store::RepartoStore;
use crate::utils::errors::AppResult;

pub struct PgRepartoStore {
    repartos: RepartoRepository,
    paradas: ParadaRepository,
    envios: EnvioRepository,
    empresas: EmpresaRepository,
    clientes: ClienteRepository,
    repartidores: RepartidorRepository,
}

impl PgRepartoStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repartos: RepartoRepository::new(pool.clone()),
            paradas: ParadaRepository::new(pool.clone()),
            envios: EnvioRepository::new(pool.clone()),
            empresas: EmpresaRepository::new(pool.clone()),
            clientes: ClienteRepository::new(pool.clone()),
            repartidores: RepartidorRepository::new(pool),
        }
    }
}

#[async_trait]
impl RepartoStore for PgRepartoStore {
    async fn find_repartidor(&self, id: Uuid) -> AppResult<Option<Repartidor>> {
        self.repartidores.find_by_id(id).await
    }

    async fn find_empresa(&self, id: Uuid) -> AppResult<Option<Empresa>> {
        self.empresas.find_by_id(id).await
    }

    async fn find_cliente(&self, id: Uuid) -> AppResult<Option<Cliente>> {
        self.clientes.find_by_id(id).await
    }

    async fn find_reparto(&self, id: Uuid) -> AppResult<Option<Reparto>> {
        self.repartos.find_by_id(id).await
    }

    async fn insert_reparto(&self, nuevo: &NuevoReparto) -> AppResult<Reparto> {
        self.repartos.create(nuevo).await
    }

    async fn update_reparto_estado(&self, id: Uuid, estado: EstadoReparto) -> AppResult<Reparto> {
        self.repartos.update_estado(id, estado).await
    }

    async fn find_envios(&self, ids: &[Uuid]) -> AppResult<Vec<Envio>> {
        self.envios.find_by_ids(ids).await
    }

    async fn insert_envio(&self, nuevo: &NuevoEnvio) -> AppResult<Envio> {
        self.envios.create(nuevo).await
    }

    async fn asignar_envios(&self, ids: &[Uuid], reparto_id: Uuid) -> AppResult<u64> {
        self.envios.asignar_a_reparto(ids, reparto_id).await
    }

    async fn update_envios_estado(&self, ids: &[Uuid], estado: EstadoEnvio) -> AppResult<u64> {
        self.envios.update_estado_many(ids, estado).await
    }

    async fn insert_paradas(&self, paradas: &[NuevaParada]) -> AppResult<Vec<ParadaReparto>> {
        self.paradas.insert_many(paradas).await
    }

    async fn list_paradas(&self, reparto_id: Uuid) -> AppResult<Vec<ParadaReparto>> {
        self.paradas.list_by_reparto(reparto_id).await
    }

    async fn update_parada_orden(&self, parada_id: Uuid, orden: i32) -> AppResult<()> {
        self.paradas.update_orden(parada_id, orden).await
    }

    async fn commit_orden(&self, reparto_id: Uuid, cambios: &[(Uuid, i32)]) -> AppResult<()> {
        self.paradas.apply_orders(reparto_id, cambios).await
    }
}
