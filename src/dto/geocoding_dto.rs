use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Coordenadas;

#[derive(Debug, Deserialize, Validate)]
pub struct GeocodificarRequest {
    #[validate(length(min = 3, max = 300))]
    pub direccion: String,
}

#[derive(Debug, Serialize)]
pub struct GeocodificarResponse {
    pub direccion: String,
    pub encontrada: bool,
    pub coordenadas: Option<Coordenadas>,
    pub motivo: Option<String>,
}
