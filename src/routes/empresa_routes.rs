use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::controllers::empresa_controller::EmpresaController;
use crate::dto::api_response::ApiResponse;
use crate::dto::empresa_dto::{ActualizarEmpresaRequest, CrearEmpresaRequest, EmpresaFilters};
use crate::models::empresa::Empresa;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::pagination::Paginated;

pub fn create_empresa_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/:id", get(obtener).put(actualizar))
}

async fn listar(
    State(state): State<AppState>,
    Query(filters): Query<EmpresaFilters>,
) -> Result<Json<ApiResponse<Paginated<Empresa>>>, AppError> {
    let controller = EmpresaController::new(state.pool.clone());
    Ok(Json(controller.listar(filters).await?))
}

async fn crear(
    State(state): State<AppState>,
    Json(request): Json<CrearEmpresaRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Empresa>>), AppError> {
    let controller = EmpresaController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn obtener(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Empresa>>, AppError> {
    let controller = EmpresaController::new(state.pool.clone());
    Ok(Json(controller.obtener(id).await?))
}

async fn actualizar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActualizarEmpresaRequest>,
) -> Result<Json<ApiResponse<Empresa>>, AppError> {
    let controller = EmpresaController::new(state.pool.clone());
    Ok(Json(controller.actualizar(id, request).await?))
}
