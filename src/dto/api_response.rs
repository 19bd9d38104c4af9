use serde::Serialize;

use crate::services::unit_of_work::Outcome;

// Sobre común de todas las respuestas exitosas
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    // Fallo parcial de una operación que igualmente se completó
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            info: None,
        }
    }

    pub fn success_with_info(data: T, info: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            info: Some(info.into()),
        }
    }
}

impl<T> From<Outcome<T>> for ApiResponse<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self {
            success: true,
            data: Some(outcome.data),
            error: outcome.error,
            info: if outcome.info.is_empty() {
                None
            } else {
                Some(outcome.info.join("; "))
            },
        }
    }
}
