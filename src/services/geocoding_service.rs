//! Servicio de geocodificación
//!
//! Convierte direcciones de la ciudad operativa en coordenadas usando la
//! API de Google Geocoding. Un resultado sólo se acepta si pertenece a la
//! localidad configurada y cae dentro de su caja geográfica; cualquier otra
//! cosa se trata como "no encontrado" para no ubicar paradas en otra ciudad.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{BoundingBox, GeocodingConfig};
use crate::models::Coordenadas;

const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Resultado de geocodificar una dirección
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Encontrado(Coordenadas),
    NoEncontrado,
    /// El proveedor no pudo responder (clave inválida, cuota, red)
    NoDisponible(String),
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, direccion: &str) -> GeocodeOutcome;
}

#[derive(Debug, Deserialize)]
pub struct GoogleGeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GoogleGeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleGeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: GoogleGeometry,
    #[serde(default)]
    pub address_components: Vec<GoogleAddressComponent>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleGeometry {
    pub location: GoogleLocation,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct GoogleAddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl GoogleGeocodeResult {
    fn localidad(&self) -> Option<&GoogleAddressComponent> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == "locality"))
    }
}

/// Regla de aceptación: localidad igual a la ciudad y punto dentro de la caja
pub fn accept_result(
    result: &GoogleGeocodeResult,
    ciudad: &str,
    bounds: &BoundingBox,
) -> Option<Coordenadas> {
    let ciudad = ciudad.trim().to_lowercase();
    let localidad_ok = result.localidad().is_some_and(|c| {
        c.long_name.trim().to_lowercase() == ciudad || c.short_name.trim().to_lowercase() == ciudad
    });

    let location = &result.geometry.location;
    if localidad_ok && bounds.contains(location.lat, location.lng) {
        Some(Coordenadas::new(location.lat, location.lng))
    } else {
        None
    }
}

/// Completar la dirección con ciudad, provincia y país si no menciona la ciudad
pub fn normalize_address(direccion: &str, config: &GeocodingConfig) -> String {
    let direccion = direccion.trim().trim_end_matches(',');
    if direccion.to_lowercase().contains(&config.ciudad.to_lowercase()) {
        direccion.to_string()
    } else {
        format!(
            "{}, {}, {}, {}",
            direccion, config.ciudad, config.provincia, config.pais
        )
    }
}

pub struct GoogleGeocodingService {
    client: Client,
    api_key: String,
    config: GeocodingConfig,
}

impl GoogleGeocodingService {
    /// `None` si no hay API key configurada
    pub fn from_config(config: &GeocodingConfig, client: Client) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            client,
            api_key,
            config: config.clone(),
        })
    }

    async fn request(&self, direccion: &str) -> Result<GoogleGeocodeResponse, String> {
        let components = format!("locality:{}|country:{}", self.config.ciudad, self.config.pais);
        let url = format!(
            "{}?address={}&components={}&key={}",
            GOOGLE_GEOCODE_URL,
            urlencoding::encode(direccion),
            urlencoding::encode(&components),
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| format!("sin respuesta del servicio de geocodificación: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("el servicio de geocodificación respondió {}", status));
        }

        response
            .json::<GoogleGeocodeResponse>()
            .await
            .map_err(|e| format!("respuesta de geocodificación ilegible: {}", e))
    }
}

#[async_trait]
impl Geocoder for GoogleGeocodingService {
    async fn geocode(&self, direccion: &str) -> GeocodeOutcome {
        let consulta = normalize_address(direccion, &self.config);
        log::info!("🗺️ Geocodificando: {}", consulta);

        let response = match self.request(&consulta).await {
            Ok(response) => response,
            Err(motivo) => {
                log::warn!("⚠️ Geocodificación no disponible: {}", motivo);
                return GeocodeOutcome::NoDisponible(motivo);
            }
        };

        match response.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => {
                log::info!("🔍 Sin resultados para: {}", consulta);
                return GeocodeOutcome::NoEncontrado;
            }
            otro => {
                let motivo = match response.error_message {
                    Some(detalle) => format!("{}: {}", otro, detalle),
                    None => otro.to_string(),
                };
                log::warn!("⚠️ Geocodificación rechazada: {}", motivo);
                return GeocodeOutcome::NoDisponible(motivo);
            }
        }

        let aceptado = response
            .results
            .first()
            .and_then(|r| accept_result(r, &self.config.ciudad, &self.config.bounds));

        match aceptado {
            Some(coordenadas) => {
                log::info!(
                    "✅ Geocodificado: {} -> ({}, {})",
                    consulta,
                    coordenadas.lat,
                    coordenadas.lng
                );
                GeocodeOutcome::Encontrado(coordenadas)
            }
            None => {
                log::info!("📍 Resultado fuera de {} descartado: {}", self.config.ciudad, consulta);
                GeocodeOutcome::NoEncontrado
            }
        }
    }
}
