use std::sync::Arc;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::geocoding_dto::{GeocodificarRequest, GeocodificarResponse};
use crate::services::geocoding_service::{GeocodeOutcome, Geocoder};
use crate::utils::errors::{AppError, AppResult};

pub struct GeocodingController {
    geocoder: Option<Arc<dyn Geocoder>>,
}

impl GeocodingController {
    pub fn new(geocoder: Option<Arc<dyn Geocoder>>) -> Self {
        Self { geocoder }
    }

    /// Geocodificar una dirección suelta, útil para diagnosticar cargas
    pub async fn geocodificar(
        &self,
        request: GeocodificarRequest,
    ) -> AppResult<ApiResponse<GeocodificarResponse>> {
        request.validate()?;
        let geocoder = self.geocoder.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable(
                "Geocodificación no disponible: falta configurar GOOGLE_GEOCODING_API_KEY".to_string(),
            )
        })?;

        let direccion = request.direccion.trim().to_string();
        let (coordenadas, motivo) = match geocoder.geocode(&direccion).await {
            GeocodeOutcome::Encontrado(coordenadas) => (Some(coordenadas), None),
            GeocodeOutcome::NoEncontrado => (
                None,
                Some("Sin resultados dentro de la zona de cobertura".to_string()),
            ),
            GeocodeOutcome::NoDisponible(motivo) => (None, Some(motivo)),
        };

        Ok(ApiResponse::success(GeocodificarResponse {
            direccion,
            encontrada: coordenadas.is_some(),
            coordenadas,
            motivo,
        }))
    }
}
