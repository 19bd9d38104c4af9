use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::PaginationParams;
use crate::utils::validation::validate_not_empty;

// Request para crear un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CrearClienteRequest {
    pub empresa_id: Option<Uuid>,
    #[validate(length(max = 120), custom = "validate_not_empty")]
    pub nombre: String,
    #[validate(length(max = 120))]
    pub apellido: Option<String>,
    pub direccion: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitud: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitud: Option<f64>,
    #[validate(length(max = 50))]
    pub telefono: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub notas: Option<String>,
    pub activo: Option<bool>,
}

// Request para actualizar un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarClienteRequest {
    pub empresa_id: Option<Uuid>,
    #[validate(length(max = 120), custom = "validate_not_empty")]
    pub nombre: Option<String>,
    #[validate(length(max = 120))]
    pub apellido: Option<String>,
    pub direccion: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitud: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitud: Option<f64>,
    #[validate(length(max = 50))]
    pub telefono: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub notas: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClienteFilters {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub activo: Option<bool>,
    pub empresa_id: Option<Uuid>,
}

impl ClienteFilters {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}
