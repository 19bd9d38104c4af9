pub mod api_response;
pub mod catalogo_dto;
pub mod cliente_dto;
pub mod empresa_dto;
pub mod envio_dto;
pub mod geocoding_dto;
pub mod repartidor_dto;
pub mod reparto_dto;
pub mod ruta_dto;
