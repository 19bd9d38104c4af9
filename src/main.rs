use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use reparto_backoffice::config::database::DatabaseConfig;
use reparto_backoffice::config::environment::EnvironmentConfig;
use reparto_backoffice::create_app;
use reparto_backoffice::database::DatabaseConnection;
use reparto_backoffice::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚚 Back-office de repartos");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::connect(&DatabaseConfig::from_environment(&config)).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(db_connection.pool().clone(), config);
    let app = create_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("🏢 Entidades:");
    info!("   GET/POST /api/empresas, GET/PUT /api/empresas/:id");
    info!("   GET/POST /api/clientes, GET/PUT /api/clientes/:id");
    info!("   GET/POST /api/repartidores, GET/PUT /api/repartidores/:id");
    info!("   GET/POST /api/tipos-paquete, GET/PUT /api/tipos-paquete/:id");
    info!("   GET/POST /api/tipos-servicio, GET/PUT /api/tipos-servicio/:id");
    info!("📦 Envíos:");
    info!("   GET/POST /api/envios, GET/PUT /api/envios/:id");
    info!("   PUT  /api/envios/:id/estado - Cambiar estado");
    info!("   POST /api/envios/opciones-entrega - Sugerir servicios");
    info!("🗺️ Repartos:");
    info!("   GET/POST /api/repartos - Listar / crear desde envíos");
    info!("   POST /api/repartos/lote - Crear por lote desde clientes");
    info!("   GET  /api/repartos/:id - Detalle con paradas");
    info!("   PUT  /api/repartos/:id/estado - Cambiar estado en cascada");
    info!("   POST /api/repartos/:id/paradas/:parada_id/mover - Mover parada");
    info!("   PUT  /api/repartos/:id/orden - Aplicar orden");
    info!("   POST /api/repartos/:id/sugerir-ruta - Sugerir ruta");
    info!("📍 POST /api/geocoding - Geocodificar una dirección");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
