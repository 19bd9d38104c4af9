//! Configuración de variables de entorno
//!
//! Este módulo lee el entorno una sola vez al arrancar. Los adaptadores
//! externos (geocodificación, IA) reciben su configuración desde aquí
//! y nunca leen variables de entorno por su cuenta.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Caja geográfica aceptada para resultados de geocodificación
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }
}

impl Default for BoundingBox {
    /// Mar del Plata y alrededores
    fn default() -> Self {
        Self {
            min_lat: -38.15,
            max_lat: -37.90,
            min_lng: -57.70,
            max_lng: -57.45,
        }
    }
}

/// Configuración del geocodificador
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub api_key: Option<String>,
    pub ciudad: String,
    pub provincia: String,
    pub pais: String,
    pub bounds: BoundingBox,
    pub timeout: Duration,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            ciudad: "Mar del Plata".to_string(),
            provincia: "Buenos Aires".to_string(),
            pais: "Argentina".to_string(),
            bounds: BoundingBox::default(),
            timeout: Duration::from_secs(20),
        }
    }
}

/// Configuración del modelo de lenguaje (sugerencias de ruta y de servicio)
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub cors_origins: Vec<String>,
    pub geocoding: GeocodingConfig,
    pub ai: AiConfig,
}

impl EnvironmentConfig {
    /// Construir la configuración desde el entorno del proceso
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .context("DATABASE_URL debe estar definida en las variables de entorno")?;

        let timeout = Duration::from_secs(parse_var("EXTERNAL_TIMEOUT_SECS", 20u64)?);

        let geocoding = GeocodingConfig {
            api_key: optional_var("GOOGLE_GEOCODING_API_KEY"),
            ciudad: var_or("GEOCODING_CITY", "Mar del Plata"),
            provincia: var_or("GEOCODING_PROVINCE", "Buenos Aires"),
            pais: var_or("GEOCODING_COUNTRY", "Argentina"),
            bounds: BoundingBox::default(),
            timeout,
        };

        let ai = AiConfig {
            api_key: optional_var("GEMINI_API_KEY"),
            model: var_or("GEMINI_MODEL", "gemini-2.5-flash"),
            timeout,
            ..AiConfig::default()
        };

        Ok(Self {
            environment: var_or("ENVIRONMENT", "development"),
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", 3000u16)?,
            log_level: var_or("LOG_LEVEL", "info"),
            database_url,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 10u32)?,
            cors_origins: optional_var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            geocoding,
            ai,
        })
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: "postgres://localhost/reparto".to_string(),
            db_max_connections: 10,
            cors_origins: Vec::new(),
            geocoding: GeocodingConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn var_or(name: &str, default: &str) -> String {
    optional_var(name).unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_var(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} debe ser un número válido (valor: '{}')", name, raw)),
        None => Ok(default),
    }
}
