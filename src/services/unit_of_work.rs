//! Unidad de trabajo para operaciones de varios pasos
//!
//! La base no ofrece transacciones entre las tablas que tocan estas
//! operaciones, así que cada paso declara qué pasa si falla:
//!
//! * `primary`: el error corta la operación y se propaga.
//! * `or_warn`: se registra y la operación sigue; queda como `info`.
//! * `or_partial`: se registra y la operación sigue, pero el resultado
//!   lleva un `error` que describe el fallo parcial.

use serde::Serialize;
use std::future::Future;

use crate::utils::errors::AppResult;

/// Resultado de una operación de varios pasos
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<T> {
    pub data: T,
    pub info: Vec<String>,
    pub error: Option<String>,
}

impl<T> Outcome<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            info: Vec::new(),
            error: None,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.error.is_some()
    }
}

pub struct UnitOfWork {
    operacion: &'static str,
    pasos: Vec<String>,
    info: Vec<String>,
    fallos: Vec<String>,
}

impl UnitOfWork {
    pub fn begin(operacion: &'static str) -> Self {
        log::debug!("🧾 Inicio de '{}'", operacion);
        Self {
            operacion,
            pasos: Vec::new(),
            info: Vec::new(),
            fallos: Vec::new(),
        }
    }

    /// Paso principal: si falla, no hay nada que informar como parcial
    pub async fn primary<T, F>(&mut self, paso: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match fut.await {
            Ok(value) => {
                self.pasos.push(paso.to_string());
                Ok(value)
            }
            Err(e) => {
                log::error!("❌ [{}] falló el paso '{}': {}", self.operacion, paso, e);
                Err(e)
            }
        }
    }

    /// Paso dependiente cuyo fallo sólo merece un aviso
    pub async fn or_warn<T, F>(&mut self, aviso: impl Into<String>, fut: F) -> Option<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let aviso = aviso.into();
        match fut.await {
            Ok(value) => {
                self.pasos.push(aviso);
                Some(value)
            }
            Err(e) => {
                log::warn!("⚠️ [{}] {}: {}", self.operacion, aviso, e);
                self.info.push(aviso);
                None
            }
        }
    }

    /// Paso dependiente cuyo fallo deja la operación parcialmente aplicada
    pub async fn or_partial<T, F>(&mut self, fallo: impl Into<String>, fut: F) -> Option<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let fallo = fallo.into();
        match fut.await {
            Ok(value) => {
                self.pasos.push(fallo);
                Some(value)
            }
            Err(e) => {
                log::error!("❌ [{}] fallo parcial: {}: {}", self.operacion, fallo, e);
                self.fallos.push(fallo);
                None
            }
        }
    }

    /// Nota informativa sin paso asociado
    pub fn note(&mut self, nota: impl Into<String>) {
        let nota = nota.into();
        log::info!("ℹ️ [{}] {}", self.operacion, nota);
        self.info.push(nota);
    }

    /// Registrar un fallo parcial detectado fuera de un paso
    pub fn partial(&mut self, fallo: impl Into<String>) {
        let fallo = fallo.into();
        log::error!("❌ [{}] fallo parcial: {}", self.operacion, fallo);
        self.fallos.push(fallo);
    }

    pub fn finish<T>(self, data: T) -> Outcome<T> {
        log::debug!(
            "🧾 Fin de '{}': {} pasos, {} avisos, {} fallos",
            self.operacion,
            self.pasos.len(),
            self.info.len(),
            self.fallos.len()
        );
        Outcome {
            data,
            info: self.info,
            error: if self.fallos.is_empty() {
                None
            } else {
                Some(self.fallos.join("; "))
            },
        }
    }
}
