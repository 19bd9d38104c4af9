//! Modelo de Parada de reparto
//!
//! Cada parada ocupa una posición `orden` dentro de su reparto. Las
//! posiciones de un reparto forman siempre el rango contiguo `0..N`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefijo del token sintético que identifica la parada de retiro
pub const COMPANY_TOKEN_PREFIX: &str = "company-";

/// Tipo de parada - mapea al ENUM tipo_parada
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "tipo_parada", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoParada {
    RetiroEmpresa,
    EntregaCliente,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParadaReparto {
    pub id: Uuid,
    pub reparto_id: Uuid,
    pub tipo: TipoParada,
    pub envio_id: Option<Uuid>,
    pub orden: i32,
    pub created_at: DateTime<Utc>,
}

/// Parada a insertar. Los constructores garantizan que una entrega
/// siempre lleva envío y un retiro nunca.
#[derive(Debug, Clone, PartialEq)]
pub struct NuevaParada {
    pub reparto_id: Uuid,
    pub tipo: TipoParada,
    pub envio_id: Option<Uuid>,
    pub orden: i32,
}

impl NuevaParada {
    pub fn retiro_empresa(reparto_id: Uuid, orden: i32) -> Self {
        Self {
            reparto_id,
            tipo: TipoParada::RetiroEmpresa,
            envio_id: None,
            orden,
        }
    }

    pub fn entrega_cliente(reparto_id: Uuid, envio_id: Uuid, orden: i32) -> Self {
        Self {
            reparto_id,
            tipo: TipoParada::EntregaCliente,
            envio_id: Some(envio_id),
            orden,
        }
    }
}

/// Dirección de un movimiento manual de parada
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DireccionMovimiento {
    Arriba,
    Abajo,
}

/// Referencia a una parada dentro de un orden externo (manual o sugerido).
///
/// `company-{id}` apunta a la parada de retiro del reparto; el id embebido
/// no se usa para resolverla.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ParadaRef {
    RetiroEmpresa { token: String },
    Id(Uuid),
}

impl ParadaRef {
    pub fn company_token(empresa_id: Uuid) -> String {
        format!("{}{}", COMPANY_TOKEN_PREFIX, empresa_id)
    }
}

impl FromStr for ParadaRef {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.starts_with(COMPANY_TOKEN_PREFIX) {
            return Ok(ParadaRef::RetiroEmpresa { token: value.to_string() });
        }
        Uuid::parse_str(value)
            .map(ParadaRef::Id)
            .map_err(|_| format!("Referencia de parada inválida: '{}'", value))
    }
}

impl TryFrom<String> for ParadaRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ParadaRef> for String {
    fn from(value: ParadaRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ParadaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParadaRef::RetiroEmpresa { token } => f.write_str(token),
            ParadaRef::Id(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_company_token() {
        let empresa_id = Uuid::new_v4();
        let token = ParadaRef::company_token(empresa_id);
        assert_eq!(
            token.parse::<ParadaRef>().unwrap(),
            ParadaRef::RetiroEmpresa { token: token.clone() }
        );
    }

    #[test]
    fn test_parse_uuid_y_basura() {
        let id = Uuid::new_v4();
        assert_eq!(id.to_string().parse::<ParadaRef>().unwrap(), ParadaRef::Id(id));
        assert!("parada-7".parse::<ParadaRef>().is_err());
    }

    #[test]
    fn test_deserialize_lista_mixta() {
        let id = Uuid::new_v4();
        let json = format!("[\"company-42\", \"{}\"]", id);
        let refs: Vec<ParadaRef> = serde_json::from_str(&json).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1], ParadaRef::Id(id));
    }

    #[test]
    fn test_constructores_de_parada() {
        let reparto = Uuid::new_v4();
        let envio = Uuid::new_v4();
        assert_eq!(NuevaParada::retiro_empresa(reparto, 0).envio_id, None);
        assert_eq!(NuevaParada::entrega_cliente(reparto, envio, 1).envio_id, Some(envio));
    }
}
