//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP con el sobre `{success, error, ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::borrow::Cow;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl AppError {
    /// Código HTTP asociado a cada tipo de error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Código estable para que el frontend distinga los casos
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DB_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::ExternalApi(_) => "EXTERNAL_API_ERROR",
        }
    }

    /// Mensaje legible para el operador. Los errores de sistema nunca
    /// exponen el detalle interno.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Los datos enviados no son válidos".to_string(),
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg)
            | AppError::ServiceUnavailable(msg) => msg.clone(),
            AppError::ExternalApi(_) => {
                "Error al comunicarse con un servicio externo. Intente nuevamente más tarde".to_string()
            }
            AppError::Configuration(_) => {
                "La configuración del servidor está incompleta. Contacte al administrador".to_string()
            }
            AppError::Database(_) | AppError::Internal(_) => {
                "Ocurrió un error inesperado. Intente nuevamente".to_string()
            }
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Validation(e) => Some(json!(e)),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(_) | AppError::Internal(_) | AppError::Configuration(_) => {
                log::error!("❌ {}", self);
            }
            AppError::ExternalApi(_) | AppError::ServiceUnavailable(_) => {
                log::warn!("⚠️ {}", self);
            }
            _ => log::info!("↩️ {}", self),
        }

        let body = ErrorResponse {
            success: false,
            error: self.user_message(),
            details: self.details(),
            code: self.code(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Convertir un error de SQLx en `AppError`, detectando violaciones de unicidad
pub fn db_error(context: &str, error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            return AppError::Conflict(format!(
                "{}: ya existe un registro con esos datos",
                context
            ));
        }
    }
    AppError::Database(format!("{}: {}", context, error))
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        db_error("Error de base de datos", error)
    }
}

/// Función helper para crear errores de validación de un campo
pub fn validation_error(field: &'static str, message: impl Into<String>) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(Cow::Owned(message.into()));

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} con id '{}' no encontrado", resource, id))
}
