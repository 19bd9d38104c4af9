use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::controllers::catalogo_controller::{TipoPaqueteController, TipoServicioController};
use crate::dto::api_response::ApiResponse;
use crate::dto::catalogo_dto::{
    ActualizarTipoPaqueteRequest, ActualizarTipoServicioRequest, CatalogoFilters,
    CrearTipoPaqueteRequest, CrearTipoServicioRequest,
};
use crate::models::catalogo::{TipoPaquete, TipoServicio};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::pagination::Paginated;

pub fn create_tipo_paquete_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar_paquetes).post(crear_paquete))
        .route("/:id", get(obtener_paquete).put(actualizar_paquete))
}

pub fn create_tipo_servicio_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar_servicios).post(crear_servicio))
        .route("/:id", get(obtener_servicio).put(actualizar_servicio))
}

async fn listar_paquetes(
    State(state): State<AppState>,
    Query(filters): Query<CatalogoFilters>,
) -> Result<Json<ApiResponse<Paginated<TipoPaquete>>>, AppError> {
    let controller = TipoPaqueteController::new(state.pool.clone());
    Ok(Json(controller.listar(filters).await?))
}

async fn crear_paquete(
    State(state): State<AppState>,
    Json(request): Json<CrearTipoPaqueteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TipoPaquete>>), AppError> {
    let controller = TipoPaqueteController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn obtener_paquete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TipoPaquete>>, AppError> {
    let controller = TipoPaqueteController::new(state.pool.clone());
    Ok(Json(controller.obtener(id).await?))
}

async fn actualizar_paquete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActualizarTipoPaqueteRequest>,
) -> Result<Json<ApiResponse<TipoPaquete>>, AppError> {
    let controller = TipoPaqueteController::new(state.pool.clone());
    Ok(Json(controller.actualizar(id, request).await?))
}

async fn listar_servicios(
    State(state): State<AppState>,
    Query(filters): Query<CatalogoFilters>,
) -> Result<Json<ApiResponse<Paginated<TipoServicio>>>, AppError> {
    let controller = TipoServicioController::new(state.pool.clone());
    Ok(Json(controller.listar(filters).await?))
}

async fn crear_servicio(
    State(state): State<AppState>,
    Json(request): Json<CrearTipoServicioRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TipoServicio>>), AppError> {
    let controller = TipoServicioController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn obtener_servicio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TipoServicio>>, AppError> {
    let controller = TipoServicioController::new(state.pool.clone());
    Ok(Json(controller.obtener(id).await?))
}

async fn actualizar_servicio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActualizarTipoServicioRequest>,
) -> Result<Json<ApiResponse<TipoServicio>>, AppError> {
    let controller = TipoServicioController::new(state.pool.clone());
    Ok(Json(controller.actualizar(id, request).await?))
}
