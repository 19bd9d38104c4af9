//! Extractores con rechazo propio
//!
//! Envuelven `Json`, `Path` y `Query` de axum para que un cuerpo mal
//! formado o un parámetro inválido respondan con el mismo sobre
//! `{success: false, error, code}` que el resto de los errores.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::errors::{validation_error, AppError};

/// Cuerpo JSON; también sirve como respuesta
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => validation_error(
                "cuerpo",
                format!("Los datos no tienen el formato esperado: {}", e.body_text()),
            ),
            JsonRejection::JsonSyntaxError(_) => {
                AppError::BadRequest("El cuerpo de la solicitud no es un JSON válido".to_string())
            }
            JsonRejection::MissingJsonContentType(_) => AppError::BadRequest(
                "Falta el encabezado 'Content-Type: application/json'".to_string(),
            ),
            _ => AppError::BadRequest("No se pudo leer el cuerpo de la solicitud".to_string()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => validation_error(
                "ruta",
                format!("Parámetro de ruta inválido: {}", e.body_text()),
            ),
            _ => AppError::BadRequest("Faltan parámetros en la ruta".to_string()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        validation_error(
            "query",
            format!("Parámetros de consulta inválidos: {}", rejection.body_text()),
        )
    }
}
