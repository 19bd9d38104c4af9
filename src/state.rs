//! Estado compartido de la aplicación
//!
//! Se clona en cada request; los adaptadores externos son opcionales y
//! quedan en `None` cuando falta su clave de API.

use reqwest::Client;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::pg_reparto_store::PgRepartoStore;
use crate::services::delivery_options_service::{DeliveryOptionAdvisor, GeminiDeliveryAdvisor};
use crate::services::gemini_client::GeminiClient;
use crate::services::geocoding_service::{Geocoder, GoogleGeocodingService};
use crate::services::reparto_store::RepartoStore;
use crate::services::route_suggestion_service::{GeminiRouteSuggester, RouteSuggester};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub http_client: Client,
    pub geocoder: Option<Arc<dyn Geocoder>>,
    pub route_suggester: Option<Arc<dyn RouteSuggester>>,
    pub delivery_advisor: Option<Arc<dyn DeliveryOptionAdvisor>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let http_client = Client::new();

        let geocoder: Option<Arc<dyn Geocoder>> =
            GoogleGeocodingService::from_config(&config.geocoding, http_client.clone())
                .map(|g| Arc::new(g) as Arc<dyn Geocoder>);
        if geocoder.is_none() {
            log::warn!("⚠️ GOOGLE_GEOCODING_API_KEY no configurada: las direcciones no se geocodificarán");
        }

        let gemini = GeminiClient::from_config(&config.ai, http_client.clone());
        if gemini.is_none() {
            log::warn!("⚠️ GEMINI_API_KEY no configurada: sugerencias de ruta y de entrega deshabilitadas");
        }
        let route_suggester = gemini
            .clone()
            .map(|c| Arc::new(GeminiRouteSuggester::new(c)) as Arc<dyn RouteSuggester>);
        let delivery_advisor = gemini
            .map(|c| Arc::new(GeminiDeliveryAdvisor::new(c)) as Arc<dyn DeliveryOptionAdvisor>);

        Self {
            pool,
            config,
            http_client,
            geocoder,
            route_suggester,
            delivery_advisor,
        }
    }

    /// Store de repartos sobre el pool compartido
    pub fn store(&self) -> Arc<dyn RepartoStore> {
        Arc::new(PgRepartoStore::new(self.pool.clone()))
    }
}
