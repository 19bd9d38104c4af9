pub mod delivery_options_service;
pub mod envio_service;
pub mod estado_reparto_service;
pub mod gemini_client;
pub mod geocoding_service;
pub mod parada_ordering;
pub mod reparto_builder;
pub mod reparto_query_service;
pub mod reparto_store;
pub mod route_suggestion_service;
pub mod unit_of_work;
