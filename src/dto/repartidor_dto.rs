use serde::Deserialize;
use validator::Validate;

use crate::utils::pagination::PaginationParams;
use crate::utils::validation::validate_not_empty;

#[derive(Debug, Deserialize, Validate)]
pub struct CrearRepartidorRequest {
    #[validate(length(max = 120), custom = "validate_not_empty")]
    pub nombre: String,
    #[validate(length(max = 50))]
    pub telefono: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarRepartidorRequest {
    #[validate(length(max = 120), custom = "validate_not_empty")]
    pub nombre: Option<String>,
    #[validate(length(max = 50))]
    pub telefono: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RepartidorFilters {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub activo: Option<bool>,
}

impl RepartidorFilters {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}
