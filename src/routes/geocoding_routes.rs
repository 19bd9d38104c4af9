use axum::{extract::State, routing::post, Router};

use crate::controllers::geocoding_controller::GeocodingController;
use crate::dto::api_response::ApiResponse;
use crate::dto::geocoding_dto::{GeocodificarRequest, GeocodificarResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::Json;

pub fn create_geocoding_router() -> Router<AppState> {
    Router::new().route("/", post(geocodificar))
}

async fn geocodificar(
    State(state): State<AppState>,
    Json(request): Json<GeocodificarRequest>,
) -> Result<Json<ApiResponse<GeocodificarResponse>>, AppError> {
    let controller = GeocodingController::new(state.geocoder.clone());
    Ok(Json(controller.geocodificar(request).await?))
}
