use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::PaginationParams;
use crate::utils::validation::validate_peso;

/// Cómo se cotiza un envío.
///
/// En JSON va etiquetado por `tipo`:
/// `{"tipo": "servicio_catalogo", "tipo_servicio_id": "...", "precio_final": null}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum ServicioSeleccion {
    #[default]
    SinServicio,
    PrecioManual {
        monto: Decimal,
    },
    ServicioCatalogo {
        tipo_servicio_id: Uuid,
        #[serde(default)]
        precio_final: Option<Decimal>,
    },
}

// Request para crear o actualizar un envío
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnvioRequest {
    pub cliente_id: Option<Uuid>,
    #[validate(length(max = 200))]
    pub nombre_cliente_temporal: Option<String>,
    pub direccion_destino: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitud_destino: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitud_destino: Option<f64>,
    pub tipo_paquete_id: Option<Uuid>,
    #[validate(custom = "validate_peso")]
    pub peso_kg: Decimal,
    #[serde(default)]
    pub servicio: ServicioSeleccion,
    pub notas: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CambiarEstadoEnvioRequest {
    pub estado: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EnvioFilters {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub estado: Option<String>,
    pub reparto_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
    pub search: Option<String>,
}

impl EnvioFilters {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

// Borrador de envío para pedir opciones de servicio
#[derive(Debug, Deserialize, Validate)]
pub struct OpcionesEntregaRequest {
    #[validate(length(min = 1, max = 300))]
    pub direccion_destino: String,
    #[validate(custom = "validate_peso")]
    pub peso_kg: Decimal,
    pub tipo_paquete_id: Option<Uuid>,
}

// Opción recomendada, siempre perteneciente al catálogo activo
#[derive(Debug, Clone, Serialize)]
pub struct OpcionEntrega {
    pub tipo_servicio_id: Uuid,
    pub nombre: String,
    pub precio: Decimal,
    pub tiempo_entrega_horas: Option<i32>,
    pub motivo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OpcionesEntregaResponse {
    pub opciones: Vec<OpcionEntrega>,
    pub notas: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_servicio_seleccion_etiquetado() {
        let id = Uuid::new_v4();
        let json = format!(
            "{{\"tipo\": \"servicio_catalogo\", \"tipo_servicio_id\": \"{}\"}}",
            id
        );
        let seleccion: ServicioSeleccion = serde_json::from_str(&json).unwrap();
        assert_eq!(
            seleccion,
            ServicioSeleccion::ServicioCatalogo {
                tipo_servicio_id: id,
                precio_final: None
            }
        );

        let manual: ServicioSeleccion =
            serde_json::from_str("{\"tipo\": \"precio_manual\", \"monto\": \"1500.50\"}").unwrap();
        assert_eq!(
            manual,
            ServicioSeleccion::PrecioManual {
                monto: Decimal::from_str("1500.50").unwrap()
            }
        );
    }

    #[test]
    fn test_servicio_por_defecto() {
        let json = "{\"nombre_cliente_temporal\": \"Ana\", \"direccion_destino\": \"Colón 1200\", \"peso_kg\": \"2.5\"}";
        let request: EnvioRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.servicio, ServicioSeleccion::SinServicio);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_peso_cero_invalido() {
        let json = "{\"nombre_cliente_temporal\": \"Ana\", \"peso_kg\": \"0\"}";
        let request: EnvioRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }
}
