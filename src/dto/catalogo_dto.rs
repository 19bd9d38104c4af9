use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::utils::pagination::PaginationParams;
use crate::utils::validation::{validate_not_empty, validate_peso, validate_precio};

// Tipos de paquete

#[derive(Debug, Deserialize, Validate)]
pub struct CrearTipoPaqueteRequest {
    #[validate(length(max = 120), custom = "validate_not_empty")]
    pub nombre: String,
    pub descripcion: Option<String>,
    #[validate(length(max = 120))]
    pub dimensiones: Option<String>,
    #[validate(custom = "validate_peso")]
    pub peso_max_kg: Option<Decimal>,
    pub activo: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarTipoPaqueteRequest {
    #[validate(length(max = 120), custom = "validate_not_empty")]
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    #[validate(length(max = 120))]
    pub dimensiones: Option<String>,
    #[validate(custom = "validate_peso")]
    pub peso_max_kg: Option<Decimal>,
    pub activo: Option<bool>,
}

// Tipos de servicio

#[derive(Debug, Deserialize, Validate)]
pub struct CrearTipoServicioRequest {
    #[validate(length(max = 120), custom = "validate_not_empty")]
    pub nombre: String,
    pub descripcion: Option<String>,
    #[validate(custom = "validate_precio")]
    pub precio: Decimal,
    #[validate(range(min = 1, max = 720))]
    pub tiempo_entrega_horas: Option<i32>,
    pub activo: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarTipoServicioRequest {
    #[validate(length(max = 120), custom = "validate_not_empty")]
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    #[validate(custom = "validate_precio")]
    pub precio: Option<Decimal>,
    #[validate(range(min = 1, max = 720))]
    pub tiempo_entrega_horas: Option<i32>,
    pub activo: Option<bool>,
}

// Filtros compartidos por los dos catálogos
#[derive(Debug, Default, Deserialize)]
pub struct CatalogoFilters {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub activo: Option<bool>,
}

impl CatalogoFilters {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}
