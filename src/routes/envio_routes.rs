use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use uuid::Uuid;

use crate::controllers::envio_controller::EnvioController;
use crate::dto::api_response::ApiResponse;
use crate::dto::envio_dto::{
    CambiarEstadoEnvioRequest, EnvioFilters, EnvioRequest, OpcionesEntregaRequest,
    OpcionesEntregaResponse,
};
use crate::models::envio::Envio;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::pagination::Paginated;

pub fn create_envio_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/opciones-entrega", post(opciones_entrega))
        .route("/:id", get(obtener).put(actualizar))
        .route("/:id/estado", put(cambiar_estado))
}

async fn listar(
    State(state): State<AppState>,
    Query(filters): Query<EnvioFilters>,
) -> Result<Json<ApiResponse<Paginated<Envio>>>, AppError> {
    let controller = EnvioController::new(&state);
    Ok(Json(controller.listar(filters).await?))
}

async fn crear(
    State(state): State<AppState>,
    Json(request): Json<EnvioRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Envio>>), AppError> {
    let controller = EnvioController::new(&state);
    let response = controller.crear(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn obtener(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Envio>>, AppError> {
    let controller = EnvioController::new(&state);
    Ok(Json(controller.obtener(id).await?))
}

async fn actualizar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EnvioRequest>,
) -> Result<Json<ApiResponse<Envio>>, AppError> {
    let controller = EnvioController::new(&state);
    Ok(Json(controller.actualizar(id, request).await?))
}

async fn cambiar_estado(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CambiarEstadoEnvioRequest>,
) -> Result<Json<ApiResponse<Envio>>, AppError> {
    let controller = EnvioController::new(&state);
    Ok(Json(controller.cambiar_estado(id, request).await?))
}

async fn opciones_entrega(
    State(state): State<AppState>,
    Json(request): Json<OpcionesEntregaRequest>,
) -> Result<Json<ApiResponse<OpcionesEntregaResponse>>, AppError> {
    let controller = EnvioController::new(&state);
    Ok(Json(controller.opciones_entrega(request).await?))
}
