use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::utils::pagination::PaginationParams;
use crate::utils::validation::{validate_not_empty, validate_precio};

// Request para crear una empresa
#[derive(Debug, Deserialize, Validate)]
pub struct CrearEmpresaRequest {
    #[validate(length(max = 200), custom = "validate_not_empty")]
    pub nombre: String,
    pub direccion: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitud: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitud: Option<f64>,
    #[validate(length(max = 50))]
    pub telefono: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_precio")]
    pub precio_por_envio: Option<Decimal>,
    pub activo: Option<bool>,
}

// Request para actualizar una empresa (campos ausentes no cambian)
#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarEmpresaRequest {
    #[validate(length(max = 200), custom = "validate_not_empty")]
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitud: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitud: Option<f64>,
    #[validate(length(max = 50))]
    pub telefono: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_precio")]
    pub precio_por_envio: Option<Decimal>,
    pub activo: Option<bool>,
}

// Filtros del listado de empresas
#[derive(Debug, Default, Deserialize)]
pub struct EmpresaFilters {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub activo: Option<bool>,
}

impl EmpresaFilters {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}
