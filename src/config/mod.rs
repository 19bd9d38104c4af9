//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos, variables de entorno
//! y de los servicios externos.

pub mod database;
pub mod environment;

pub use environment::*;
