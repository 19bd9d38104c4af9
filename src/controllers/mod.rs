pub mod catalogo_controller;
pub mod cliente_controller;
pub mod empresa_controller;
pub mod envio_controller;
pub mod geocoding_controller;
pub mod repartidor_controller;
pub mod reparto_controller;
