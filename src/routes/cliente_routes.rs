use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::controllers::cliente_controller::ClienteController;
use crate::dto::api_response::ApiResponse;
use crate::dto::cliente_dto::{ActualizarClienteRequest, ClienteFilters, CrearClienteRequest};
use crate::models::cliente::Cliente;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::pagination::Paginated;

pub fn create_cliente_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/:id", get(obtener).put(actualizar))
}

async fn listar(
    State(state): State<AppState>,
    Query(filters): Query<ClienteFilters>,
) -> Result<Json<ApiResponse<Paginated<Cliente>>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    Ok(Json(controller.listar(filters).await?))
}

async fn crear(
    State(state): State<AppState>,
    Json(request): Json<CrearClienteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Cliente>>), AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn obtener(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Cliente>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    Ok(Json(controller.obtener(id).await?))
}

async fn actualizar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActualizarClienteRequest>,
) -> Result<Json<ApiResponse<Cliente>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    Ok(Json(controller.actualizar(id, request).await?))
}
