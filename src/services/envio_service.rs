//! Ciclo de vida de los envíos
//!
//! Alta, edición, cambio de estado y listado. Las reglas de negocio
//! (destinatario, dirección, cotización y transiciones de estado) están en
//! funciones puras; `EnvioService` sólo las encadena con la base y el
//! geocodificador.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::envio_dto::{EnvioFilters, EnvioRequest, ServicioSeleccion};
use crate::models::catalogo::TipoServicio;
use crate::models::cliente::Cliente;
use crate::models::envio::{Envio, EstadoEnvio, NuevoEnvio};
use crate::models::Coordenadas;
use crate::repositories::catalogo_repository::{TipoPaqueteRepository, TipoServicioRepository};
use crate::repositories::cliente_repository::ClienteRepository;
use crate::repositories::envio_repository::EnvioRepository;
use crate::services::geocoding_service::{GeocodeOutcome, Geocoder};
use crate::services::unit_of_work::Outcome;
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::pagination::{search_pattern, Paginated};
use crate::utils::validation::non_blank;

/// Destinatario de un envío: un cliente registrado o un nombre suelto
#[derive(Debug, Clone, PartialEq)]
pub enum Destinatario {
    Cliente(Uuid),
    Temporal(String),
}

pub fn resolver_destinatario(
    cliente_id: Option<Uuid>,
    nombre_temporal: Option<&str>,
) -> AppResult<Destinatario> {
    match (cliente_id, non_blank(nombre_temporal)) {
        (Some(id), None) => Ok(Destinatario::Cliente(id)),
        (None, Some(nombre)) => Ok(Destinatario::Temporal(nombre.to_string())),
        (Some(_), Some(_)) => Err(validation_error(
            "cliente_id",
            "Indique un cliente registrado o un nombre temporal, no ambos",
        )),
        (None, None) => Err(validation_error(
            "cliente_id",
            "Debe indicar un cliente registrado o un nombre de destinatario",
        )),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DireccionResuelta {
    pub direccion: String,
    pub coordenadas: Option<Coordenadas>,
}

/// La dirección del cliente, si la tiene, manda sobre la manual
pub fn resolver_direccion(
    cliente: Option<&Cliente>,
    direccion_manual: Option<&str>,
    coordenadas_manual: Option<Coordenadas>,
) -> AppResult<DireccionResuelta> {
    if let Some(cliente) = cliente {
        if let Some(direccion) = cliente.direccion_utilizable() {
            return Ok(DireccionResuelta {
                direccion: direccion.to_string(),
                coordenadas: cliente.coordenadas(),
            });
        }
    }

    match non_blank(direccion_manual) {
        Some(direccion) => Ok(DireccionResuelta {
            direccion: direccion.to_string(),
            coordenadas: coordenadas_manual,
        }),
        None => Err(validation_error(
            "direccion_destino",
            "La dirección de destino es requerida",
        )),
    }
}

/// Geocodificar si faltan coordenadas. Nunca falla: deja una nota.
pub async fn completar_coordenadas(
    geocoder: Option<&dyn Geocoder>,
    resuelta: &mut DireccionResuelta,
    info: &mut Vec<String>,
) {
    if resuelta.coordenadas.is_some() {
        return;
    }

    let Some(geocoder) = geocoder else {
        info.push("Geocodificación no configurada; el envío queda sin coordenadas".to_string());
        return;
    };

    match geocoder.geocode(&resuelta.direccion).await {
        GeocodeOutcome::Encontrado(coordenadas) => {
            resuelta.coordenadas = Some(coordenadas);
            info.push("Dirección geocodificada".to_string());
        }
        GeocodeOutcome::NoEncontrado => {
            info.push("No se encontraron coordenadas para la dirección; el envío queda sin coordenadas".to_string());
        }
        GeocodeOutcome::NoDisponible(motivo) => {
            info.push(format!(
                "Geocodificación no disponible ({}); el envío queda sin coordenadas",
                motivo
            ));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cotizacion {
    pub tipo_servicio_id: Option<Uuid>,
    pub precio_final: Option<Decimal>,
    pub nota: Option<String>,
}

/// Resolver servicio y precio final. `catalogo` es el servicio referido,
/// si la selección lo pide y existe.
pub fn resolver_servicio(
    seleccion: &ServicioSeleccion,
    catalogo: Option<&TipoServicio>,
) -> AppResult<Cotizacion> {
    let precio_valido = |precio: Decimal| {
        if precio.is_sign_negative() {
            Err(validation_error("servicio", "El precio final no puede ser negativo"))
        } else {
            Ok(precio)
        }
    };

    match seleccion {
        ServicioSeleccion::SinServicio => Ok(Cotizacion {
            tipo_servicio_id: None,
            precio_final: None,
            nota: None,
        }),
        ServicioSeleccion::PrecioManual { monto } => Ok(Cotizacion {
            tipo_servicio_id: None,
            precio_final: Some(precio_valido(*monto)?),
            nota: None,
        }),
        ServicioSeleccion::ServicioCatalogo {
            tipo_servicio_id,
            precio_final,
        } => {
            let servicio = catalogo
                .filter(|s| s.id == *tipo_servicio_id && s.activo)
                .ok_or_else(|| {
                    validation_error(
                        "servicio",
                        format!("El servicio {} no existe o no está activo", tipo_servicio_id),
                    )
                })?;

            match precio_final {
                Some(precio) => Ok(Cotizacion {
                    tipo_servicio_id: Some(servicio.id),
                    precio_final: Some(precio_valido(*precio)?),
                    nota: None,
                }),
                None => Ok(Cotizacion {
                    tipo_servicio_id: Some(servicio.id),
                    precio_final: Some(servicio.precio),
                    nota: Some(format!(
                        "Se aplicó el precio de catálogo de '{}': {}",
                        servicio.nombre, servicio.precio
                    )),
                }),
            }
        }
    }
}

/// Los estados terminales no admiten cambios
pub fn validar_cambio_estado(actual: EstadoEnvio, nuevo: EstadoEnvio) -> AppResult<()> {
    if actual.is_terminal() && actual != nuevo {
        return Err(validation_error(
            "estado",
            format!("El envío está en estado '{}' y ya no puede cambiar", actual),
        ));
    }
    Ok(())
}

pub struct EnvioService {
    envios: EnvioRepository,
    clientes: ClienteRepository,
    paquetes: TipoPaqueteRepository,
    servicios: TipoServicioRepository,
    geocoder: Option<Arc<dyn Geocoder>>,
}

impl EnvioService {
    pub fn new(pool: PgPool, geocoder: Option<Arc<dyn Geocoder>>) -> Self {
        Self {
            envios: EnvioRepository::new(pool.clone()),
            clientes: ClienteRepository::new(pool.clone()),
            paquetes: TipoPaqueteRepository::new(pool.clone()),
            servicios: TipoServicioRepository::new(pool),
            geocoder,
        }
    }

    /// Validar el request y armar los datos a persistir
    async fn preparar(&self, request: EnvioRequest) -> AppResult<(NuevoEnvio, Vec<String>)> {
        request.validate()?;
        let mut info = Vec::new();

        let destinatario = resolver_destinatario(
            request.cliente_id,
            request.nombre_cliente_temporal.as_deref(),
        )?;

        let cliente = match &destinatario {
            Destinatario::Cliente(id) => Some(
                self.clientes
                    .find_by_id(*id)
                    .await?
                    .ok_or_else(|| not_found_error("Cliente", id))?,
            ),
            Destinatario::Temporal(_) => None,
        };

        let coordenadas_manual =
            Coordenadas::from_columns(request.latitud_destino, request.longitud_destino);
        let mut direccion = resolver_direccion(
            cliente.as_ref(),
            request.direccion_destino.as_deref(),
            coordenadas_manual,
        )?;
        completar_coordenadas(self.geocoder.as_deref(), &mut direccion, &mut info).await;

        if let Some(tipo_paquete_id) = request.tipo_paquete_id {
            self.paquetes
                .find_by_id(tipo_paquete_id)
                .await?
                .ok_or_else(|| {
                    validation_error(
                        "tipo_paquete_id",
                        format!("El tipo de paquete {} no existe", tipo_paquete_id),
                    )
                })?;
        }

        let catalogo = match &request.servicio {
            ServicioSeleccion::ServicioCatalogo { tipo_servicio_id, .. } => {
                self.servicios.find_by_id(*tipo_servicio_id).await?
            }
            _ => None,
        };
        let cotizacion = resolver_servicio(&request.servicio, catalogo.as_ref())?;
        if let Some(nota) = cotizacion.nota {
            info.push(nota);
        }

        let nombre_cliente_temporal = match destinatario {
            Destinatario::Temporal(nombre) => Some(nombre),
            Destinatario::Cliente(_) => None,
        };

        Ok((
            NuevoEnvio {
                cliente_id: cliente.map(|c| c.id),
                nombre_cliente_temporal,
                direccion_destino: direccion.direccion,
                coordenadas: direccion.coordenadas,
                tipo_paquete_id: request.tipo_paquete_id,
                peso_kg: request.peso_kg,
                tipo_servicio_id: cotizacion.tipo_servicio_id,
                precio_final: cotizacion.precio_final,
                estado: EstadoEnvio::PendienteAsignacion,
                reparto_id: None,
                notas: request.notas,
            },
            info,
        ))
    }

    pub async fn crear(&self, request: EnvioRequest) -> AppResult<Outcome<Envio>> {
        let (nuevo, info) = self.preparar(request).await?;
        let envio = self.envios.create(&nuevo).await?;
        log::info!("📦 Envío {} creado para {}", envio.id, envio.direccion_destino);
        Ok(Outcome {
            data: envio,
            info,
            error: None,
        })
    }

    pub async fn actualizar(&self, id: Uuid, request: EnvioRequest) -> AppResult<Outcome<Envio>> {
        self.envios
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Envío", id))?;

        let (datos, info) = self.preparar(request).await?;
        let envio = self
            .envios
            .update(id, &datos)
            .await?
            .ok_or_else(|| not_found_error("Envío", id))?;
        log::info!("📦 Envío {} actualizado", envio.id);
        Ok(Outcome {
            data: envio,
            info,
            error: None,
        })
    }

    pub async fn obtener(&self, id: Uuid) -> AppResult<Envio> {
        self.envios
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Envío", id))
    }

    pub async fn cambiar_estado(&self, id: Uuid, estado: &str) -> AppResult<Envio> {
        let nuevo: EstadoEnvio = estado.parse().map_err(|e: String| validation_error("estado", e))?;
        let actual = self.obtener(id).await?;
        validar_cambio_estado(actual.estado, nuevo)?;

        let envio = self
            .envios
            .update_estado(id, nuevo)
            .await?
            .ok_or_else(|| not_found_error("Envío", id))?;
        log::info!("🔄 Envío {}: {} -> {}", id, actual.estado, nuevo);
        Ok(envio)
    }

    pub async fn listar(&self, filters: &EnvioFilters) -> AppResult<Paginated<Envio>> {
        let estado = match non_blank(filters.estado.as_deref()) {
            Some(valor) => Some(
                valor
                    .parse::<EstadoEnvio>()
                    .map_err(|e| validation_error("estado", e))?,
            ),
            None => None,
        };
        let search = search_pattern(filters.search.as_deref());
        let pagination = filters.pagination();

        let (envios, total) = self
            .envios
            .list(
                estado,
                filters.reparto_id,
                filters.cliente_id,
                search.as_deref(),
                pagination,
            )
            .await?;
        Ok(Paginated::new(envios, total, pagination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::str::FromStr;

    struct GeocoderFijo(GeocodeOutcome);

    #[async_trait]
    impl Geocoder for GeocoderFijo {
        async fn geocode(&self, _direccion: &str) -> GeocodeOutcome {
            self.0.clone()
        }
    }

    fn cliente(direccion: Option<&str>, coords: Option<(f64, f64)>) -> Cliente {
        Cliente {
            id: Uuid::new_v4(),
            empresa_id: None,
            nombre: "Lucía".to_string(),
            apellido: Some("Pereyra".to_string()),
            direccion: direccion.map(str::to_string),
            latitud: coords.map(|c| c.0),
            longitud: coords.map(|c| c.1),
            telefono: None,
            email: None,
            notas: None,
            activo: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn servicio(precio: &str, activo: bool) -> TipoServicio {
        TipoServicio {
            id: Uuid::new_v4(),
            nombre: "Express".to_string(),
            descripcion: None,
            precio: Decimal::from_str(precio).unwrap(),
            tiempo_entrega_horas: Some(4),
            activo,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_destinatario_exactamente_uno() {
        let id = Uuid::new_v4();
        assert_eq!(resolver_destinatario(Some(id), None).unwrap(), Destinatario::Cliente(id));
        assert_eq!(
            resolver_destinatario(None, Some(" Ana ")).unwrap(),
            Destinatario::Temporal("Ana".to_string())
        );
        assert!(resolver_destinatario(Some(id), Some("Ana")).is_err());
        assert!(resolver_destinatario(None, Some("  ")).is_err());
    }

    #[test]
    fn test_direccion_del_cliente_gana() {
        let c = cliente(Some("Güemes 2500"), Some((-38.0, -57.55)));
        let resuelta = resolver_direccion(Some(&c), Some("Otra 123"), None).unwrap();
        assert_eq!(resuelta.direccion, "Güemes 2500");
        assert_eq!(resuelta.coordenadas, Some(Coordenadas::new(-38.0, -57.55)));
    }

    #[test]
    fn test_direccion_manual_si_el_cliente_no_tiene() {
        let c = cliente(None, None);
        let manual = Coordenadas::new(-38.01, -57.56);
        let resuelta = resolver_direccion(Some(&c), Some("Otra 123"), Some(manual)).unwrap();
        assert_eq!(resuelta.direccion, "Otra 123");
        assert_eq!(resuelta.coordenadas, Some(manual));
        assert!(resolver_direccion(Some(&c), None, None).is_err());
    }

    #[tokio::test]
    async fn test_completar_coordenadas_geocodifica() {
        let geocoder = GeocoderFijo(GeocodeOutcome::Encontrado(Coordenadas::new(-38.0, -57.5)));
        let mut resuelta = DireccionResuelta {
            direccion: "Colón 1200".to_string(),
            coordenadas: None,
        };
        let mut info = Vec::new();
        completar_coordenadas(Some(&geocoder as &dyn Geocoder), &mut resuelta, &mut info).await;
        assert_eq!(resuelta.coordenadas, Some(Coordenadas::new(-38.0, -57.5)));
        assert_eq!(info, vec!["Dirección geocodificada".to_string()]);
    }

    #[tokio::test]
    async fn test_completar_coordenadas_degrada_sin_error() {
        let geocoder = GeocoderFijo(GeocodeOutcome::NoDisponible("REQUEST_DENIED".to_string()));
        let mut resuelta = DireccionResuelta {
            direccion: "Colón 1200".to_string(),
            coordenadas: None,
        };
        let mut info = Vec::new();
        completar_coordenadas(Some(&geocoder as &dyn Geocoder), &mut resuelta, &mut info).await;
        assert!(resuelta.coordenadas.is_none());
        assert!(info[0].contains("REQUEST_DENIED"));

        let mut info = Vec::new();
        completar_coordenadas(None, &mut resuelta, &mut info).await;
        assert!(info[0].contains("no configurada"));
    }

    #[test]
    fn test_precio_de_catalogo_por_defecto() {
        let s = servicio("2500.00", true);
        let seleccion = ServicioSeleccion::ServicioCatalogo {
            tipo_servicio_id: s.id,
            precio_final: None,
        };
        let cotizacion = resolver_servicio(&seleccion, Some(&s)).unwrap();
        assert_eq!(cotizacion.precio_final, Some(s.precio));
        assert!(cotizacion.nota.is_some());
    }

    #[test]
    fn test_precio_manual_con_servicio() {
        let s = servicio("2500.00", true);
        let seleccion = ServicioSeleccion::ServicioCatalogo {
            tipo_servicio_id: s.id,
            precio_final: Some(Decimal::from(1800)),
        };
        let cotizacion = resolver_servicio(&seleccion, Some(&s)).unwrap();
        assert_eq!(cotizacion.precio_final, Some(Decimal::from(1800)));
        assert!(cotizacion.nota.is_none());
    }

    #[test]
    fn test_servicio_inactivo_o_inexistente() {
        let s = servicio("2500.00", false);
        let seleccion = ServicioSeleccion::ServicioCatalogo {
            tipo_servicio_id: s.id,
            precio_final: None,
        };
        assert!(resolver_servicio(&seleccion, Some(&s)).is_err());
        assert!(resolver_servicio(&seleccion, None).is_err());
    }

    #[test]
    fn test_precio_manual_negativo() {
        let seleccion = ServicioSeleccion::PrecioManual {
            monto: Decimal::from(-1),
        };
        assert!(resolver_servicio(&seleccion, None).is_err());
        assert_eq!(
            resolver_servicio(&ServicioSeleccion::SinServicio, None).unwrap().precio_final,
            None
        );
    }

    #[test]
    fn test_estados_terminales_no_cambian() {
        assert!(validar_cambio_estado(EstadoEnvio::Entregado, EstadoEnvio::EnTransito).is_err());
        assert!(validar_cambio_estado(EstadoEnvio::Cancelado, EstadoEnvio::PendienteAsignacion).is_err());
        assert!(validar_cambio_estado(EstadoEnvio::ProblemaEntrega, EstadoEnvio::EnTransito).is_ok());
        assert!(validar_cambio_estado(EstadoEnvio::PendienteAsignacion, EstadoEnvio::Cancelado).is_ok());
    }
}
