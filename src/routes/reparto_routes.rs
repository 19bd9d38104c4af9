use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use uuid::Uuid;

use crate::controllers::reparto_controller::RepartoController;
use crate::dto::api_response::ApiResponse;
use crate::dto::reparto_dto::{
    AplicarOrdenRequest, CambiarEstadoRepartoRequest, CambioEstadoReparto,
    CrearRepartoLoteRequest, CrearRepartoRequest, MoverParadaRequest, MovimientoParada,
    RepartoCreado, RepartoDetalle, RepartoFilters,
};
use crate::dto::ruta_dto::RutaSugerida;
use crate::models::parada::ParadaReparto;
use crate::models::reparto::Reparto;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::pagination::Paginated;

pub fn create_reparto_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/lote", post(crear_lote))
        .route("/:id", get(detalle))
        .route("/:id/estado", put(cambiar_estado))
        .route("/:id/paradas/:parada_id/mover", post(mover_parada))
        .route("/:id/orden", put(aplicar_orden))
        .route("/:id/sugerir-ruta", post(sugerir_ruta))
}

async fn listar(
    State(state): State<AppState>,
    Query(filters): Query<RepartoFilters>,
) -> Result<Json<ApiResponse<Paginated<Reparto>>>, AppError> {
    let controller = RepartoController::new(&state);
    Ok(Json(controller.listar(filters).await?))
}

async fn crear(
    State(state): State<AppState>,
    Json(request): Json<CrearRepartoRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RepartoCreado>>), AppError> {
    let controller = RepartoController::new(&state);
    let response = controller.crear(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn crear_lote(
    State(state): State<AppState>,
    Json(request): Json<CrearRepartoLoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RepartoCreado>>), AppError> {
    let controller = RepartoController::new(&state);
    let response = controller.crear_lote(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn detalle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RepartoDetalle>>, AppError> {
    let controller = RepartoController::new(&state);
    Ok(Json(controller.detalle(id).await?))
}

async fn cambiar_estado(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CambiarEstadoRepartoRequest>,
) -> Result<Json<ApiResponse<CambioEstadoReparto>>, AppError> {
    let controller = RepartoController::new(&state);
    Ok(Json(controller.cambiar_estado(id, request).await?))
}

async fn mover_parada(
    State(state): State<AppState>,
    Path((id, parada_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<MoverParadaRequest>,
) -> Result<Json<ApiResponse<MovimientoParada>>, AppError> {
    let controller = RepartoController::new(&state);
    Ok(Json(controller.mover_parada(id, parada_id, request).await?))
}

async fn aplicar_orden(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AplicarOrdenRequest>,
) -> Result<Json<ApiResponse<Vec<ParadaReparto>>>, AppError> {
    let controller = RepartoController::new(&state);
    Ok(Json(controller.aplicar_orden(id, request).await?))
}

async fn sugerir_ruta(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RutaSugerida>>, AppError> {
    let controller = RepartoController::new(&state);
    Ok(Json(controller.sugerir_ruta(id).await?))
}
