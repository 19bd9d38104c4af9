//! Servicio de sugerencia de rutas
//!
//! Arma la lista de paradas con coordenadas de un reparto, pide un orden
//! al proveedor configurado y verifica que la respuesta sea una
//! permutación de lo enviado. Una respuesta inconsistente se informa pero
//! no se corrige: el operador decide si la aplica con `aplicar_orden`.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::reparto_dto::ParadaDetalle;
use crate::dto::ruta_dto::{PermutationCheck, RouteStop, RouteSuggestion, RutaSugerida};
use crate::models::parada::{ParadaRef, TipoParada};
use crate::services::gemini_client::GeminiClient;
use crate::services::reparto_query_service::RepartoQueryService;
use crate::services::reparto_store::RepartoStore;
use crate::services::unit_of_work::Outcome;
use crate::utils::errors::{validation_error, AppError, AppResult};

#[async_trait]
pub trait RouteSuggester: Send + Sync {
    async fn suggest(&self, stops: &[RouteStop]) -> AppResult<RouteSuggestion>;
}

pub struct GeminiRouteSuggester {
    client: GeminiClient,
}

impl GeminiRouteSuggester {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    fn build_prompt(stops: &[RouteStop]) -> String {
        let paradas = serde_json::to_string_pretty(stops).unwrap_or_default();
        format!(
            "Sos un planificador de recorridos de reparto urbano. Ordená las siguientes paradas \
             para minimizar la distancia total. Si hay una parada de tipo retiro_empresa, debe ir \
             primero. Usá cada id exactamente una vez y no inventes ids.\n\n\
             Paradas:\n{}\n\n\
             Respondé sólo con JSON con esta forma:\n\
             {{\"orden\": [\"id\", ...], \"notas\": \"texto breve\", \"distancia_estimada_km\": 0.0}}",
            paradas
        )
    }
}

#[async_trait]
impl RouteSuggester for GeminiRouteSuggester {
    async fn suggest(&self, stops: &[RouteStop]) -> AppResult<RouteSuggestion> {
        log::info!("🧭 Pidiendo sugerencia de ruta para {} paradas", stops.len());
        self.client.generate_json(&Self::build_prompt(stops)).await
    }
}

/// Comparar los ids enviados con el orden devuelto
pub fn validate_permutation(enviadas: &[String], devueltas: &[String]) -> PermutationCheck {
    let esperadas: HashSet<&str> = enviadas.iter().map(String::as_str).collect();
    let mut vistas: HashSet<&str> = HashSet::new();
    let mut check = PermutationCheck::default();

    for id in devueltas {
        if !esperadas.contains(id.as_str()) {
            if !check.sobrantes.contains(id) {
                check.sobrantes.push(id.clone());
            }
        } else if !vistas.insert(id.as_str()) && !check.duplicadas.contains(id) {
            check.duplicadas.push(id.clone());
        }
    }

    check.faltantes = enviadas
        .iter()
        .filter(|id| !vistas.contains(id.as_str()))
        .cloned()
        .collect();

    check
}

/// Pedir una sugerencia y validarla. El orden se devuelve tal como llegó.
pub async fn suggest_route(
    suggester: &dyn RouteSuggester,
    stops: &[RouteStop],
) -> AppResult<(RouteSuggestion, PermutationCheck)> {
    if stops.len() < 2 {
        return Err(validation_error(
            "paradas",
            "Se necesitan al menos 2 paradas con coordenadas para sugerir una ruta",
        ));
    }

    let suggestion = suggester.suggest(stops).await?;
    let ids: Vec<String> = stops.iter().map(|s| s.id.clone()).collect();
    let check = validate_permutation(&ids, &suggestion.orden);

    if !check.is_valid() {
        log::warn!("⚠️ La ruta sugerida no es una permutación de las paradas: {}", check.resumen());
    }

    Ok((suggestion, check))
}

/// Convertir las paradas del detalle en candidatas; devuelve también las
/// que quedaron afuera por no tener coordenadas.
pub fn route_stops(paradas: &[ParadaDetalle], empresa_id: Option<Uuid>) -> (Vec<RouteStop>, Vec<String>) {
    let mut stops = Vec::new();
    let mut sin_coordenadas = Vec::new();

    for detalle in paradas {
        let nombre = detalle.nombre.as_deref().unwrap_or("Destinatario sin nombre");
        let label = match detalle.direccion.as_deref() {
            Some(direccion) => format!("{} - {}", nombre, direccion),
            None => nombre.to_string(),
        };

        let id = match (detalle.parada.tipo, empresa_id) {
            (TipoParada::RetiroEmpresa, Some(empresa_id)) => ParadaRef::company_token(empresa_id),
            _ => detalle.parada.id.to_string(),
        };

        match detalle.coordenadas {
            Some(coordenadas) => stops.push(RouteStop {
                id,
                label,
                lat: coordenadas.lat,
                lng: coordenadas.lng,
                kind: Some(detalle.parada.tipo),
            }),
            None => sin_coordenadas.push(label),
        }
    }

    (stops, sin_coordenadas)
}

pub struct RutaService {
    consultas: RepartoQueryService,
    suggester: Option<Arc<dyn RouteSuggester>>,
}

impl RutaService {
    pub fn new(store: Arc<dyn RepartoStore>, suggester: Option<Arc<dyn RouteSuggester>>) -> Self {
        Self {
            consultas: RepartoQueryService::new(store),
            suggester,
        }
    }

    pub async fn sugerir_ruta(&self, reparto_id: Uuid) -> AppResult<Outcome<RutaSugerida>> {
        let suggester = self.suggester.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable(
                "La sugerencia de rutas no está disponible: falta configurar GEMINI_API_KEY".to_string(),
            )
        })?;

        let detalle = self.consultas.detalle(reparto_id).await?;
        let (stops, sin_coordenadas) = route_stops(&detalle.paradas, detalle.reparto.empresa_id);

        let mut info: Vec<String> = sin_coordenadas
            .iter()
            .map(|label| format!("Parada sin coordenadas excluida: {}", label))
            .collect();

        let (suggestion, validacion) = suggest_route(suggester.as_ref(), &stops).await?;
        if !validacion.is_valid() {
            info.push(format!(
                "La ruta sugerida no coincide con las paradas del reparto ({})",
                validacion.resumen()
            ));
        }

        log::info!(
            "✅ Ruta sugerida para reparto {}: {} paradas",
            reparto_id,
            suggestion.orden.len()
        );

        Ok(Outcome {
            data: RutaSugerida {
                reparto_id,
                orden: suggestion.orden,
                notas: suggestion.notas,
                distancia_estimada_km: suggestion.distancia_estimada_km,
                paradas_consideradas: stops.len(),
                validacion,
            },
            info,
            error: None,
        })
    }
}
