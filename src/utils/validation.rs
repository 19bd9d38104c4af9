//! Utilidades de validación
//!
//! Funciones helper usadas por los `#[validate(custom = ...)]` de los DTOs
//! y por los servicios.

use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor no sea negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Peso de un envío: estrictamente positivo
pub fn validate_peso(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)
}

/// Precios: cero permitido, negativos no
pub fn validate_precio(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

/// Normalizar un texto opcional: `Some("  ")` se trata como ausente
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Av. Colón 1234").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_peso_y_precio() {
        assert!(validate_peso(&Decimal::new(15, 1)).is_ok());
        assert!(validate_peso(&Decimal::ZERO).is_err());
        assert!(validate_precio(&Decimal::ZERO).is_ok());
        assert!(validate_precio(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Güemes 200 ")), Some("Güemes 200"));
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
    }
}
