//! Armado de repartos
//!
//! Dos modos:
//! * `crear_reparto`: toma envíos existentes y asignables y genera una
//!   parada de entrega por envío, en el orden recibido.
//! * `crear_reparto_lote`: parte de una empresa y una lista de clientes;
//!   crea un envío por cliente y una parada de retiro si la empresa tiene
//!   punto de retiro.
//!
//! En ambos casos las posiciones de las paradas quedan contiguas desde 0.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::reparto_dto::{CrearRepartoLoteRequest, CrearRepartoRequest, RepartoCreado};
use crate::models::cliente::Cliente;
use crate::models::envio::{EstadoEnvio, NuevoEnvio};
use crate::models::parada::NuevaParada;
use crate::models::reparto::{NuevoReparto, TipoReparto};
use crate::models::Coordenadas;
use crate::services::geocoding_service::{GeocodeOutcome, Geocoder};
use crate::services::reparto_store::RepartoStore;
use crate::services::unit_of_work::{Outcome, UnitOfWork};
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

/// Peso asignado a los envíos generados por lote
pub const PESO_LOTE_KG: Decimal = Decimal::ONE;

pub struct RepartoBuilder {
    store: Arc<dyn RepartoStore>,
    geocoder: Option<Arc<dyn Geocoder>>,
}

impl RepartoBuilder {
    pub fn new(store: Arc<dyn RepartoStore>) -> Self {
        Self { store, geocoder: None }
    }

    pub fn with_geocoder(mut self, geocoder: Option<Arc<dyn Geocoder>>) -> Self {
        self.geocoder = geocoder;
        self
    }

    /// Reparto con envíos existentes
    pub async fn crear_reparto(&self, request: CrearRepartoRequest) -> AppResult<Outcome<RepartoCreado>> {
        request.validate()?;

        if request.tipo == TipoReparto::ViajeEmpresaLote {
            return Err(validation_error(
                "tipo",
                "Los repartos por lote se crean desde /api/repartos/lote",
            ));
        }
        match (request.tipo.requiere_empresa(), request.empresa_id) {
            (true, None) => {
                return Err(validation_error(
                    "empresa_id",
                    "La empresa es requerida para un viaje de empresa",
                ))
            }
            (false, Some(_)) => {
                return Err(validation_error(
                    "empresa_id",
                    "Un reparto individual no lleva empresa",
                ))
            }
            _ => {}
        }

        if let Some(duplicado) = primer_duplicado(&request.envio_ids) {
            return Err(validation_error(
                "envio_ids",
                format!("El envío {} figura más de una vez", duplicado),
            ));
        }

        self.store
            .find_repartidor(request.repartidor_id)
            .await?
            .ok_or_else(|| not_found_error("Repartidor", request.repartidor_id))?;

        if let Some(empresa_id) = request.empresa_id {
            self.store
                .find_empresa(empresa_id)
                .await?
                .ok_or_else(|| not_found_error("Empresa", empresa_id))?;
        }

        let envios = self.store.find_envios(&request.envio_ids).await?;
        let encontrados: HashSet<Uuid> = envios.iter().map(|e| e.id).collect();
        let faltantes: Vec<String> = request
            .envio_ids
            .iter()
            .filter(|id| !encontrados.contains(id))
            .map(Uuid::to_string)
            .collect();
        if !faltantes.is_empty() {
            return Err(AppError::NotFound(format!(
                "Envíos no encontrados: {}",
                faltantes.join(", ")
            )));
        }
        if let Some(envio) = envios.iter().find(|e| !e.estado.is_asignable()) {
            return Err(validation_error(
                "envio_ids",
                format!(
                    "El envío {} está en estado '{}' y no puede asignarse a un reparto",
                    envio.id, envio.estado
                ),
            ));
        }

        let mut uow = UnitOfWork::begin("crear_reparto");
        let nuevo = NuevoReparto {
            fecha_reparto: request.fecha_reparto,
            repartidor_id: request.repartidor_id,
            tipo: request.tipo,
            empresa_id: request.empresa_id,
        };
        let reparto = uow
            .primary("insertar reparto", self.store.insert_reparto(&nuevo))
            .await?;

        uow.or_warn(
            "No se pudo marcar los envíos como asignados al reparto; revise su estado",
            self.store.asignar_envios(&request.envio_ids, reparto.id),
        )
        .await;

        let nuevas: Vec<NuevaParada> = request
            .envio_ids
            .iter()
            .enumerate()
            .map(|(orden, envio_id)| NuevaParada::entrega_cliente(reparto.id, *envio_id, orden as i32))
            .collect();
        let paradas = uow
            .or_partial(
                "El reparto se creó pero no se pudieron registrar sus paradas",
                self.store.insert_paradas(&nuevas),
            )
            .await
            .unwrap_or_default();

        log::info!(
            "🚚 Reparto {} creado con {} paradas",
            reparto.id,
            paradas.len()
        );

        Ok(uow.finish(RepartoCreado {
            reparto,
            paradas,
            envios_creados: Vec::new(),
            clientes_omitidos: Vec::new(),
        }))
    }

    /// Reparto por lote a partir de clientes de una empresa
    pub async fn crear_reparto_lote(
        &self,
        request: CrearRepartoLoteRequest,
    ) -> AppResult<Outcome<RepartoCreado>> {
        if let Some(duplicado) = primer_duplicado(&request.cliente_ids) {
            return Err(validation_error(
                "cliente_ids",
                format!("El cliente {} figura más de una vez", duplicado),
            ));
        }

        self.store
            .find_repartidor(request.repartidor_id)
            .await?
            .ok_or_else(|| not_found_error("Repartidor", request.repartidor_id))?;
        let empresa = self
            .store
            .find_empresa(request.empresa_id)
            .await?
            .ok_or_else(|| not_found_error("Empresa", request.empresa_id))?;

        let mut uow = UnitOfWork::begin("crear_reparto_lote");
        let nuevo = NuevoReparto {
            fecha_reparto: request.fecha_reparto,
            repartidor_id: request.repartidor_id,
            tipo: TipoReparto::ViajeEmpresaLote,
            empresa_id: Some(empresa.id),
        };
        let reparto = uow
            .primary("insertar reparto por lote", self.store.insert_reparto(&nuevo))
            .await?;

        let mut paradas = Vec::new();
        let mut envios_creados = Vec::new();
        let mut clientes_omitidos = Vec::new();
        let mut orden: i32 = 0;

        if empresa.punto_retiro().is_some() {
            let retiro = [NuevaParada::retiro_empresa(reparto.id, orden)];
            if let Some(mut creadas) = uow
                .or_partial(
                    format!("No se pudo crear la parada de retiro en {}", empresa.nombre),
                    self.store.insert_paradas(&retiro),
                )
                .await
            {
                paradas.append(&mut creadas);
                orden += 1;
            }
        } else {
            uow.note(format!(
                "La empresa {} no tiene dirección con coordenadas; el reparto no incluye parada de retiro",
                empresa.nombre
            ));
        }

        for cliente_id in &request.cliente_ids {
            let cliente = match self.store.find_cliente(*cliente_id).await {
                Ok(Some(cliente)) => cliente,
                Ok(None) => {
                    uow.note(format!("Cliente {} no encontrado; se omitió", cliente_id));
                    clientes_omitidos.push(*cliente_id);
                    continue;
                }
                Err(e) => {
                    log::error!("❌ Error leyendo cliente {}: {}", cliente_id, e);
                    uow.partial(format!("No se pudo leer el cliente {}", cliente_id));
                    clientes_omitidos.push(*cliente_id);
                    continue;
                }
            };

            let Some(direccion) = cliente.direccion_utilizable().map(str::to_string) else {
                uow.note(format!(
                    "El cliente {} no tiene dirección registrada; se omitió",
                    cliente.nombre_completo()
                ));
                clientes_omitidos.push(cliente.id);
                continue;
            };

            let coordenadas = match cliente.coordenadas() {
                Some(coordenadas) => Some(coordenadas),
                None => self.geocodificar(&cliente, &direccion, &mut uow).await,
            };

            let nuevo_envio = NuevoEnvio {
                cliente_id: Some(cliente.id),
                nombre_cliente_temporal: None,
                direccion_destino: direccion,
                coordenadas,
                tipo_paquete_id: None,
                peso_kg: PESO_LOTE_KG,
                tipo_servicio_id: None,
                precio_final: empresa.precio_por_envio,
                estado: EstadoEnvio::AsignadoAReparto,
                reparto_id: Some(reparto.id),
                notas: Some(format!("Generado por reparto por lote de {}", empresa.nombre)),
            };
            let Some(envio) = uow
                .or_partial(
                    format!("No se pudo crear el envío para {}", cliente.nombre_completo()),
                    self.store.insert_envio(&nuevo_envio),
                )
                .await
            else {
                continue;
            };
            envios_creados.push(envio.id);

            let entrega = [NuevaParada::entrega_cliente(reparto.id, envio.id, orden)];
            if let Some(mut creadas) = uow
                .or_partial(
                    format!(
                        "Se creó el envío de {} pero no su parada",
                        cliente.nombre_completo()
                    ),
                    self.store.insert_paradas(&entrega),
                )
                .await
            {
                paradas.append(&mut creadas);
                orden += 1;
            }
        }

        log::info!(
            "🚚 Reparto por lote {} creado: {} paradas, {} clientes omitidos",
            reparto.id,
            paradas.len(),
            clientes_omitidos.len()
        );

        Ok(uow.finish(RepartoCreado {
            reparto,
            paradas,
            envios_creados,
            clientes_omitidos,
        }))
    }

    async fn geocodificar(
        &self,
        cliente: &Cliente,
        direccion: &str,
        uow: &mut UnitOfWork,
    ) -> Option<Coordenadas> {
        let geocoder = self.geocoder.as_ref()?;
        match geocoder.geocode(direccion).await {
            GeocodeOutcome::Encontrado(coordenadas) => {
                uow.note(format!("Dirección de {} geocodificada", cliente.nombre_completo()));
                Some(coordenadas)
            }
            GeocodeOutcome::NoEncontrado => {
                uow.note(format!(
                    "No se encontraron coordenadas para la dirección de {}",
                    cliente.nombre_completo()
                ));
                None
            }
            GeocodeOutcome::NoDisponible(motivo) => {
                uow.note(format!(
                    "Geocodificación no disponible para {}: {}",
                    cliente.nombre_completo(),
                    motivo
                ));
                None
            }
        }
    }
}

fn primer_duplicado(ids: &[Uuid]) -> Option<Uuid> {
    let mut vistos = HashSet::new();
    ids.iter().find(|id| !vistos.insert(**id)).copied()
}
