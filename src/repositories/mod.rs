pub mod catalogo_repository;
pub mod cliente_repository;
pub mod empresa_repository;
pub mod envio_repository;
pub mod parada_repository;
pub mod pg_reparto_store;
pub mod repartidor_repository;
pub mod reparto_repository;
