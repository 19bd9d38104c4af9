use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::controllers::repartidor_controller::RepartidorController;
use crate::dto::api_response::ApiResponse;
use crate::dto::repartidor_dto::{
    ActualizarRepartidorRequest, CrearRepartidorRequest, RepartidorFilters,
};
use crate::models::repartidor::Repartidor;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::pagination::Paginated;

pub fn create_repartidor_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/:id", get(obtener).put(actualizar))
}

async fn listar(
    State(state): State<AppState>,
    Query(filters): Query<RepartidorFilters>,
) -> Result<Json<ApiResponse<Paginated<Repartidor>>>, AppError> {
    let controller = RepartidorController::new(state.pool.clone());
    Ok(Json(controller.listar(filters).await?))
}

async fn crear(
    State(state): State<AppState>,
    Json(request): Json<CrearRepartidorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Repartidor>>), AppError> {
    let controller = RepartidorController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn obtener(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Repartidor>>, AppError> {
    let controller = RepartidorController::new(state.pool.clone());
    Ok(Json(controller.obtener(id).await?))
}

async fn actualizar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActualizarRepartidorRequest>,
) -> Result<Json<ApiResponse<Repartidor>>, AppError> {
    let controller = RepartidorController::new(state.pool.clone());
    Ok(Json(controller.actualizar(id, request).await?))
}
