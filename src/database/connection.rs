//! Configuración de conexión a PostgreSQL
//!
//! Este módulo abre el pool y aplica las migraciones del directorio
//! `migrations/` al arrancar.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::database::DatabaseConfig;

/// Conexión a la base de datos
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar y aplicar migraciones
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        log::info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));

        let pool = config
            .create_pool()
            .await
            .context("No se pudo abrir el pool de PostgreSQL")?;

        run_migrations(&pool).await?;

        log::info!("✅ Base de datos lista");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Error aplicando migraciones")?;
    log::info!("📦 Migraciones aplicadas");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol = &url[..url.find("://").map(|p| p + 3).unwrap_or(0)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
