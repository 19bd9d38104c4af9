pub mod catalogo_routes;
pub mod cliente_routes;
pub mod empresa_routes;
pub mod envio_routes;
pub mod geocoding_routes;
pub mod repartidor_routes;
pub mod reparto_routes;

use axum::Router;

use crate::state::AppState;

/// Todas las rutas bajo `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/empresas", empresa_routes::create_empresa_router())
        .nest("/clientes", cliente_routes::create_cliente_router())
        .nest("/repartidores", repartidor_routes::create_repartidor_router())
        .nest("/tipos-paquete", catalogo_routes::create_tipo_paquete_router())
        .nest("/tipos-servicio", catalogo_routes::create_tipo_servicio_router())
        .nest("/envios", envio_routes::create_envio_router())
        .nest("/repartos", reparto_routes::create_reparto_router())
        .nest("/geocoding", geocoding_routes::create_geocoding_router())
}
