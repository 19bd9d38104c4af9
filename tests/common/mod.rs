#![allow(dead_code)]

//! Store en memoria y adaptadores falsos para los tests de integración

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use reparto_backoffice::dto::ruta_dto::{RouteStop, RouteSuggestion};
use reparto_backoffice::models::cliente::Cliente;
use reparto_backoffice::models::empresa::Empresa;
use reparto_backoffice::models::envio::{Envio, EstadoEnvio, NuevoEnvio};
use reparto_backoffice::models::parada::{NuevaParada, ParadaReparto, TipoParada};
use reparto_backoffice::models::repartidor::Repartidor;
use reparto_backoffice::models::reparto::{EstadoReparto, NuevoReparto, Reparto, TipoReparto};
use reparto_backoffice::services::geocoding_service::{GeocodeOutcome, Geocoder};
use reparto_backoffice::services::reparto_store::RepartoStore;
use reparto_backoffice::services::route_suggestion_service::RouteSuggester;
use reparto_backoffice::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct Datos {
    repartidores: HashMap<Uuid, Repartidor>,
    empresas: HashMap<Uuid, Empresa>,
    clientes: HashMap<Uuid, Cliente>,
    repartos: HashMap<Uuid, Reparto>,
    envios: HashMap<Uuid, Envio>,
    paradas: Vec<ParadaReparto>,
}

/// Fallos programados: una operación falla siempre o en llamadas puntuales
#[derive(Default)]
struct Fallas {
    siempre: HashSet<&'static str>,
    en_llamada: HashMap<&'static str, HashSet<usize>>,
    llamadas: HashMap<&'static str, usize>,
}

#[derive(Default)]
pub struct MemoryStore {
    datos: Mutex<Datos>,
    fallas: Mutex<Fallas>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fallar_siempre(&self, operacion: &'static str) {
        self.fallas.lock().unwrap().siempre.insert(operacion);
    }

    /// Falla sólo la llamada número `n` (desde 1)
    pub fn fallar_en(&self, operacion: &'static str, n: usize) {
        self.fallas
            .lock()
            .unwrap()
            .en_llamada
            .entry(operacion)
            .or_default()
            .insert(n);
    }

    fn registrar(&self, operacion: &'static str) -> AppResult<()> {
        let mut fallas = self.fallas.lock().unwrap();
        let llamada = {
            let contador = fallas.llamadas.entry(operacion).or_insert(0);
            *contador += 1;
            *contador
        };
        let falla = fallas.siempre.contains(operacion)
            || fallas
                .en_llamada
                .get(operacion)
                .map_or(false, |n| n.contains(&llamada));
        if falla {
            Err(AppError::Database(format!("fallo simulado en {}", operacion)))
        } else {
            Ok(())
        }
    }

    pub fn agregar_repartidor(&self) -> Repartidor {
        let repartidor = Repartidor {
            id: Uuid::new_v4(),
            nombre: "Martín Gómez".to_string(),
            telefono: Some("223 555-0101".to_string()),
            email: None,
            activo: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.datos
            .lock()
            .unwrap()
            .repartidores
            .insert(repartidor.id, repartidor.clone());
        repartidor
    }

    pub fn agregar_empresa(&self, con_retiro: bool) -> Empresa {
        let coordenadas = con_retiro.then_some((-38.0055, -57.5426));
        self.insertar_empresa(Some("Av. Colón 2100"), coordenadas)
    }

    /// Empresa sin dirección ni coordenadas
    pub fn agregar_empresa_sin_direccion(&self) -> Empresa {
        self.insertar_empresa(None, None)
    }

    fn insertar_empresa(&self, direccion: Option<&str>, coordenadas: Option<(f64, f64)>) -> Empresa {
        let empresa = Empresa {
            id: Uuid::new_v4(),
            nombre: "Librería del Puerto".to_string(),
            direccion: direccion.map(str::to_string),
            latitud: coordenadas.map(|c| c.0),
            longitud: coordenadas.map(|c| c.1),
            telefono: None,
            email: None,
            precio_por_envio: Some(Decimal::new(180000, 2)),
            activo: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.datos
            .lock()
            .unwrap()
            .empresas
            .insert(empresa.id, empresa.clone());
        empresa
    }

    pub fn agregar_cliente(
        &self,
        nombre: &str,
        direccion: Option<&str>,
        coordenadas: Option<(f64, f64)>,
    ) -> Cliente {
        let cliente = Cliente {
            id: Uuid::new_v4(),
            empresa_id: None,
            nombre: nombre.to_string(),
            apellido: None,
            direccion: direccion.map(str::to_string),
            latitud: coordenadas.map(|c| c.0),
            longitud: coordenadas.map(|c| c.1),
            telefono: None,
            email: None,
            notas: None,
            activo: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.datos
            .lock()
            .unwrap()
            .clientes
            .insert(cliente.id, cliente.clone());
        cliente
    }

    pub fn agregar_envio(&self, estado: EstadoEnvio, cliente_id: Option<Uuid>) -> Envio {
        let envio = Envio {
            id: Uuid::new_v4(),
            cliente_id,
            nombre_cliente_temporal: cliente_id.is_none().then(|| "Destinatario ocasional".to_string()),
            direccion_destino: "Güemes 2800".to_string(),
            latitud_destino: Some(-38.0121),
            longitud_destino: Some(-57.5452),
            tipo_paquete_id: None,
            peso_kg: Decimal::new(25, 1),
            tipo_servicio_id: None,
            precio_final: None,
            estado,
            reparto_id: None,
            notas: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.datos
            .lock()
            .unwrap()
            .envios
            .insert(envio.id, envio.clone());
        envio
    }

    /// Reparto ya armado con `n` paradas de entrega en `0..n`
    pub fn agregar_reparto_con_paradas(&self, n: usize, con_retiro: bool) -> (Reparto, Vec<ParadaReparto>) {
        let repartidor = self.agregar_repartidor();
        let empresa = con_retiro.then(|| self.agregar_empresa(true));
        let reparto = Reparto {
            id: Uuid::new_v4(),
            fecha_reparto: fecha(),
            repartidor_id: repartidor.id,
            tipo: if con_retiro {
                TipoReparto::ViajeEmpresa
            } else {
                TipoReparto::Individual
            },
            empresa_id: empresa.map(|e| e.id),
            estado: EstadoReparto::Asignado,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.datos
            .lock()
            .unwrap()
            .repartos
            .insert(reparto.id, reparto.clone());

        let mut orden = 0;
        let mut paradas = Vec::new();
        if con_retiro {
            paradas.push(self.crear_parada(reparto.id, TipoParada::RetiroEmpresa, None, orden));
            orden += 1;
        }
        for _ in 0..n {
            let envio = self.agregar_envio(EstadoEnvio::AsignadoAReparto, None);
            paradas.push(self.crear_parada(reparto.id, TipoParada::EntregaCliente, Some(envio.id), orden));
            orden += 1;
        }
        (reparto, paradas)
    }

    fn crear_parada(&self, reparto_id: Uuid, tipo: TipoParada, envio_id: Option<Uuid>, orden: i32) -> ParadaReparto {
        let parada = ParadaReparto {
            id: Uuid::new_v4(),
            reparto_id,
            tipo,
            envio_id,
            orden,
            created_at: Utc::now(),
        };
        self.datos.lock().unwrap().paradas.push(parada.clone());
        parada
    }

    pub fn paradas_de(&self, reparto_id: Uuid) -> Vec<ParadaReparto> {
        let mut paradas: Vec<ParadaReparto> = self
            .datos
            .lock()
            .unwrap()
            .paradas
            .iter()
            .filter(|p| p.reparto_id == reparto_id)
            .cloned()
            .collect();
        paradas.sort_by_key(|p| p.orden);
        paradas
    }

    pub fn ordenes_de(&self, reparto_id: Uuid) -> Vec<(Uuid, i32)> {
        self.paradas_de(reparto_id)
            .into_iter()
            .map(|p| (p.id, p.orden))
            .collect()
    }

    pub fn envio(&self, id: Uuid) -> Option<Envio> {
        self.datos.lock().unwrap().envios.get(&id).cloned()
    }

    pub fn reparto(&self, id: Uuid) -> Option<Reparto> {
        self.datos.lock().unwrap().repartos.get(&id).cloned()
    }

    pub fn cantidad_repartos(&self) -> usize {
        self.datos.lock().unwrap().repartos.len()
    }

    pub fn envios_del_reparto(&self, reparto_id: Uuid) -> Vec<Envio> {
        self.datos
            .lock()
            .unwrap()
            .envios
            .values()
            .filter(|e| e.reparto_id == Some(reparto_id))
            .cloned()
            .collect()
    }
}

pub fn fecha() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

#[async_trait]
impl RepartoStore for MemoryStore {
    async fn find_repartidor(&self, id: Uuid) -> AppResult<Option<Repartidor>> {
        self.registrar("find_repartidor")?;
        Ok(self.datos.lock().unwrap().repartidores.get(&id).cloned())
    }

    async fn find_empresa(&self, id: Uuid) -> AppResult<Option<Empresa>> {
        self.registrar("find_empresa")?;
        Ok(self.datos.lock().unwrap().empresas.get(&id).cloned())
    }

    async fn find_cliente(&self, id: Uuid) -> AppResult<Option<Cliente>> {
        self.registrar("find_cliente")?;
        Ok(self.datos.lock().unwrap().clientes.get(&id).cloned())
    }

    async fn find_reparto(&self, id: Uuid) -> AppResult<Option<Reparto>> {
        self.registrar("find_reparto")?;
        Ok(self.datos.lock().unwrap().repartos.get(&id).cloned())
    }

    async fn insert_reparto(&self, nuevo: &NuevoReparto) -> AppResult<Reparto> {
        self.registrar("insert_reparto")?;
        let reparto = Reparto {
            id: Uuid::new_v4(),
            fecha_reparto: nuevo.fecha_reparto,
            repartidor_id: nuevo.repartidor_id,
            tipo: nuevo.tipo,
            empresa_id: nuevo.empresa_id,
            estado: EstadoReparto::Asignado,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.datos
            .lock()
            .unwrap()
            .repartos
            .insert(reparto.id, reparto.clone());
        Ok(reparto)
    }

    async fn update_reparto_estado(&self, id: Uuid, estado: EstadoReparto) -> AppResult<Reparto> {
        self.registrar("update_reparto_estado")?;
        let mut datos = self.datos.lock().unwrap();
        let reparto = datos
            .repartos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Reparto {}", id)))?;
        reparto.estado = estado;
        Ok(reparto.clone())
    }

    async fn find_envios(&self, ids: &[Uuid]) -> AppResult<Vec<Envio>> {
        self.registrar("find_envios")?;
        let datos = self.datos.lock().unwrap();
        Ok(ids.iter().filter_map(|id| datos.envios.get(id).cloned()).collect())
    }

    async fn insert_envio(&self, nuevo: &NuevoEnvio) -> AppResult<Envio> {
        self.registrar("insert_envio")?;
        let envio = Envio {
            id: Uuid::new_v4(),
            cliente_id: nuevo.cliente_id,
            nombre_cliente_temporal: nuevo.nombre_cliente_temporal.clone(),
            direccion_destino: nuevo.direccion_destino.clone(),
            latitud_destino: nuevo.coordenadas.map(|c| c.lat),
            longitud_destino: nuevo.coordenadas.map(|c| c.lng),
            tipo_paquete_id: nuevo.tipo_paquete_id,
            peso_kg: nuevo.peso_kg,
            tipo_servicio_id: nuevo.tipo_servicio_id,
            precio_final: nuevo.precio_final,
            estado: nuevo.estado,
            reparto_id: nuevo.reparto_id,
            notas: nuevo.notas.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.datos
            .lock()
            .unwrap()
            .envios
            .insert(envio.id, envio.clone());
        Ok(envio)
    }

    async fn asignar_envios(&self, ids: &[Uuid], reparto_id: Uuid) -> AppResult<u64> {
        self.registrar("asignar_envios")?;
        let mut datos = self.datos.lock().unwrap();
        let mut cambiados = 0;
        for id in ids {
            if let Some(envio) = datos.envios.get_mut(id) {
                envio.estado = EstadoEnvio::AsignadoAReparto;
                envio.reparto_id = Some(reparto_id);
                cambiados += 1;
            }
        }
        Ok(cambiados)
    }

    async fn update_envios_estado(&self, ids: &[Uuid], estado: EstadoEnvio) -> AppResult<u64> {
        self.registrar("update_envios_estado")?;
        let mut datos = self.datos.lock().unwrap();
        let mut cambiados = 0;
        for id in ids {
            if let Some(envio) = datos.envios.get_mut(id) {
                envio.estado = estado;
                cambiados += 1;
            }
        }
        Ok(cambiados)
    }

    async fn insert_paradas(&self, paradas: &[NuevaParada]) -> AppResult<Vec<ParadaReparto>> {
        self.registrar("insert_paradas")?;
        let creadas: Vec<ParadaReparto> = paradas
            .iter()
            .map(|p| ParadaReparto {
                id: Uuid::new_v4(),
                reparto_id: p.reparto_id,
                tipo: p.tipo,
                envio_id: p.envio_id,
                orden: p.orden,
                created_at: Utc::now(),
            })
            .collect();
        self.datos
            .lock()
            .unwrap()
            .paradas
            .extend(creadas.iter().cloned());
        Ok(creadas)
    }

    async fn list_paradas(&self, reparto_id: Uuid) -> AppResult<Vec<ParadaReparto>> {
        self.registrar("list_paradas")?;
        Ok(self.paradas_de(reparto_id))
    }

    async fn update_parada_orden(&self, parada_id: Uuid, orden: i32) -> AppResult<()> {
        self.registrar("update_parada_orden")?;
        let mut datos = self.datos.lock().unwrap();
        let parada = datos
            .paradas
            .iter_mut()
            .find(|p| p.id == parada_id)
            .ok_or_else(|| AppError::NotFound(format!("Parada {}", parada_id)))?;
        parada.orden = orden;
        Ok(())
    }

    async fn commit_orden(&self, reparto_id: Uuid, cambios: &[(Uuid, i32)]) -> AppResult<()> {
        self.registrar("commit_orden")?;
        let mut datos = self.datos.lock().unwrap();
        let todas_presentes = cambios.iter().all(|(id, _)| {
            datos
                .paradas
                .iter()
                .any(|p| p.id == *id && p.reparto_id == reparto_id)
        });
        if !todas_presentes {
            return Err(AppError::NotFound("Parada fuera del reparto".to_string()));
        }
        for (id, orden) in cambios {
            if let Some(parada) = datos.paradas.iter_mut().find(|p| p.id == *id) {
                parada.orden = *orden;
            }
        }
        Ok(())
    }
}

/// Geocodificador que siempre responde lo mismo y cuenta las consultas
pub struct GeocoderFijo {
    respuesta: GeocodeOutcome,
    consultas: Mutex<Vec<String>>,
}

impl GeocoderFijo {
    pub fn new(respuesta: GeocodeOutcome) -> Arc<Self> {
        Arc::new(Self {
            respuesta,
            consultas: Mutex::new(Vec::new()),
        })
    }

    pub fn consultas(&self) -> Vec<String> {
        self.consultas.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for GeocoderFijo {
    async fn geocode(&self, direccion: &str) -> GeocodeOutcome {
        self.consultas.lock().unwrap().push(direccion.to_string());
        self.respuesta.clone()
    }
}

/// Sugeridor de rutas que devuelve un orden fijo, o invierte el recibido
pub struct SugeridorFijo {
    orden: Option<Vec<String>>,
    recibidas: Mutex<Vec<RouteStop>>,
}

impl SugeridorFijo {
    pub fn con_orden(orden: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            orden: Some(orden),
            recibidas: Mutex::new(Vec::new()),
        })
    }

    pub fn inverso() -> Arc<Self> {
        Arc::new(Self {
            orden: None,
            recibidas: Mutex::new(Vec::new()),
        })
    }

    pub fn recibidas(&self) -> Vec<RouteStop> {
        self.recibidas.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouteSuggester for SugeridorFijo {
    async fn suggest(&self, stops: &[RouteStop]) -> AppResult<RouteSuggestion> {
        *self.recibidas.lock().unwrap() = stops.to_vec();
        let orden = match &self.orden {
            Some(orden) => orden.clone(),
            None => stops.iter().rev().map(|s| s.id.clone()).collect(),
        };
        Ok(RouteSuggestion {
            orden,
            notas: Some("Recorrido de prueba".to_string()),
            distancia_estimada_km: Some(12.5),
        })
    }
}
