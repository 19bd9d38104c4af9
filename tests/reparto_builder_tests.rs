mod common;

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use common::{fecha, GeocoderFijo, MemoryStore};
use reparto_backoffice::dto::reparto_dto::{CrearRepartoLoteRequest, CrearRepartoRequest};
use reparto_backoffice::models::envio::EstadoEnvio;
use reparto_backoffice::models::parada::TipoParada;
use reparto_backoffice::models::reparto::TipoReparto;
use reparto_backoffice::models::Coordenadas;
use reparto_backoffice::services::geocoding_service::{GeocodeOutcome, Geocoder};
use reparto_backoffice::services::reparto_builder::{RepartoBuilder, PESO_LOTE_KG};
use reparto_backoffice::utils::errors::AppError;

fn request(repartidor_id: Uuid, envio_ids: Vec<Uuid>) -> CrearRepartoRequest {
    CrearRepartoRequest {
        fecha_reparto: fecha(),
        repartidor_id,
        tipo: TipoReparto::Individual,
        empresa_id: None,
        envio_ids,
    }
}

#[tokio::test]
async fn test_reparto_desde_envios_en_orden_recibido() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let envios: Vec<Uuid> = (0..3)
        .map(|_| store.agregar_envio(EstadoEnvio::PendienteAsignacion, None).id)
        .collect();
    let pedido = vec![envios[2], envios[0], envios[1]];

    let builder = RepartoBuilder::new(store.clone());
    let outcome = builder
        .crear_reparto(request(repartidor.id, pedido.clone()))
        .await
        .unwrap();

    assert!(outcome.error.is_none());
    assert!(outcome.info.is_empty());

    let paradas = store.paradas_de(outcome.data.reparto.id);
    let ordenes: Vec<i32> = paradas.iter().map(|p| p.orden).collect();
    assert_eq!(ordenes, vec![0, 1, 2]);
    let envios_en_paradas: Vec<Uuid> = paradas.iter().filter_map(|p| p.envio_id).collect();
    assert_eq!(envios_en_paradas, pedido);

    for id in &pedido {
        let envio = store.envio(*id).unwrap();
        assert_eq!(envio.estado, EstadoEnvio::AsignadoAReparto);
        assert_eq!(envio.reparto_id, Some(outcome.data.reparto.id));
    }
}

#[tokio::test]
async fn test_envio_sugerido_por_ia_es_asignable() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let envio = store.agregar_envio(EstadoEnvio::SugeridoIa, None);

    let outcome = RepartoBuilder::new(store.clone())
        .crear_reparto(request(repartidor.id, vec![envio.id]))
        .await
        .unwrap();
    assert_eq!(outcome.data.paradas.len(), 1);
}

#[tokio::test]
async fn test_envio_no_asignable_no_crea_nada() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let pendiente = store.agregar_envio(EstadoEnvio::PendienteAsignacion, None);
    let entregado = store.agregar_envio(EstadoEnvio::Entregado, None);

    let err = RepartoBuilder::new(store.clone())
        .crear_reparto(request(repartidor.id, vec![pendiente.id, entregado.id]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(store.cantidad_repartos(), 0);
    assert_eq!(store.envio(pendiente.id).unwrap().estado, EstadoEnvio::PendienteAsignacion);
}

#[tokio::test]
async fn test_envio_inexistente_se_informa() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let existente = store.agregar_envio(EstadoEnvio::PendienteAsignacion, None);
    let fantasma = Uuid::new_v4();

    let err = RepartoBuilder::new(store.clone())
        .crear_reparto(request(repartidor.id, vec![existente.id, fantasma]))
        .await
        .unwrap_err();

    match err {
        AppError::NotFound(mensaje) => assert!(mensaje.contains(&fantasma.to_string())),
        otro => panic!("se esperaba NotFound, llegó {:?}", otro),
    }
    assert_eq!(store.cantidad_repartos(), 0);
}

#[tokio::test]
async fn test_envio_repetido_rechazado() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let envio = store.agregar_envio(EstadoEnvio::PendienteAsignacion, None);

    let err = RepartoBuilder::new(store.clone())
        .crear_reparto(request(repartidor.id, vec![envio.id, envio.id]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_viaje_empresa_exige_empresa() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let envio = store.agregar_envio(EstadoEnvio::PendienteAsignacion, None);

    let mut pedido = request(repartidor.id, vec![envio.id]);
    pedido.tipo = TipoReparto::ViajeEmpresa;

    let err = RepartoBuilder::new(store.clone())
        .crear_reparto(pedido)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_individual_no_lleva_empresa() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let empresa = store.agregar_empresa(true);
    let envio = store.agregar_envio(EstadoEnvio::PendienteAsignacion, None);

    let mut pedido = request(repartidor.id, vec![envio.id]);
    pedido.empresa_id = Some(empresa.id);

    let err = RepartoBuilder::new(store.clone())
        .crear_reparto(pedido)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(store.cantidad_repartos(), 0);
}

#[tokio::test]
async fn test_lote_no_se_arma_por_la_via_comun() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let empresa = store.agregar_empresa(true);
    let envio = store.agregar_envio(EstadoEnvio::PendienteAsignacion, None);

    let mut pedido = request(repartidor.id, vec![envio.id]);
    pedido.tipo = TipoReparto::ViajeEmpresaLote;
    pedido.empresa_id = Some(empresa.id);

    let err = RepartoBuilder::new(store.clone())
        .crear_reparto(pedido)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_repartidor_inexistente() {
    let store = MemoryStore::new();
    let envio = store.agregar_envio(EstadoEnvio::PendienteAsignacion, None);

    let err = RepartoBuilder::new(store.clone())
        .crear_reparto(request(Uuid::new_v4(), vec![envio.id]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_fallo_al_asignar_envios_es_solo_aviso() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let envio = store.agregar_envio(EstadoEnvio::PendienteAsignacion, None);
    store.fallar_siempre("asignar_envios");

    let outcome = RepartoBuilder::new(store.clone())
        .crear_reparto(request(repartidor.id, vec![envio.id]))
        .await
        .unwrap();

    assert!(outcome.error.is_none());
    assert_eq!(outcome.info.len(), 1);
    assert_eq!(outcome.data.paradas.len(), 1);
}

#[tokio::test]
async fn test_fallo_al_crear_paradas_es_parcial() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let envio = store.agregar_envio(EstadoEnvio::PendienteAsignacion, None);
    store.fallar_siempre("insert_paradas");

    let outcome = RepartoBuilder::new(store.clone())
        .crear_reparto(request(repartidor.id, vec![envio.id]))
        .await
        .unwrap();

    assert!(outcome.is_partial());
    assert!(outcome.data.paradas.is_empty());
    assert!(store.reparto(outcome.data.reparto.id).is_some());
}

#[tokio::test]
async fn test_fallo_al_insertar_reparto_se_propaga() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let envio = store.agregar_envio(EstadoEnvio::PendienteAsignacion, None);
    store.fallar_siempre("insert_reparto");

    let err = RepartoBuilder::new(store.clone())
        .crear_reparto(request(repartidor.id, vec![envio.id]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(store.envio(envio.id).unwrap().estado, EstadoEnvio::PendienteAsignacion);
}

fn lote(repartidor_id: Uuid, empresa_id: Uuid, cliente_ids: Vec<Uuid>) -> CrearRepartoLoteRequest {
    CrearRepartoLoteRequest {
        fecha_reparto: fecha(),
        repartidor_id,
        empresa_id,
        cliente_ids,
    }
}

#[tokio::test]
async fn test_lote_con_retiro_y_clientes_omitidos() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let empresa = store.agregar_empresa(true);
    let con_coordenadas = store.agregar_cliente("Ana", Some("Rivadavia 2400"), Some((-38.0, -57.55)));
    let sin_coordenadas = store.agregar_cliente("Bruno", Some("Luro 3100"), None);
    let sin_direccion = store.agregar_cliente("Carla", None, None);

    let geocoder = GeocoderFijo::new(GeocodeOutcome::Encontrado(Coordenadas::new(-38.01, -57.56)));
    let builder = RepartoBuilder::new(store.clone()).with_geocoder(Some(geocoder.clone() as Arc<dyn Geocoder>));

    let outcome = builder
        .crear_reparto_lote(lote(
            repartidor.id,
            empresa.id,
            vec![con_coordenadas.id, sin_direccion.id, sin_coordenadas.id],
        ))
        .await
        .unwrap();

    assert!(outcome.error.is_none());
    assert_eq!(outcome.data.reparto.tipo, TipoReparto::ViajeEmpresaLote);
    assert_eq!(outcome.data.clientes_omitidos, vec![sin_direccion.id]);
    assert_eq!(outcome.data.envios_creados.len(), 2);
    assert_eq!(geocoder.consultas(), vec!["Luro 3100".to_string()]);

    let paradas = store.paradas_de(outcome.data.reparto.id);
    let resumen: Vec<(TipoParada, i32)> = paradas.iter().map(|p| (p.tipo, p.orden)).collect();
    assert_eq!(
        resumen,
        vec![
            (TipoParada::RetiroEmpresa, 0),
            (TipoParada::EntregaCliente, 1),
            (TipoParada::EntregaCliente, 2),
        ]
    );

    for envio in store.envios_del_reparto(outcome.data.reparto.id) {
        assert_eq!(envio.estado, EstadoEnvio::AsignadoAReparto);
        assert_eq!(envio.peso_kg, PESO_LOTE_KG);
        assert_eq!(envio.precio_final, empresa.precio_por_envio);
        assert!(envio.coordenadas().is_some());
    }
}

#[tokio::test]
async fn test_lote_sin_punto_de_retiro_empieza_en_cero() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let empresa = store.agregar_empresa(false);
    let cliente = store.agregar_cliente("Ana", Some("Rivadavia 2400"), Some((-38.0, -57.55)));

    let outcome = RepartoBuilder::new(store.clone())
        .crear_reparto_lote(lote(repartidor.id, empresa.id, vec![cliente.id]))
        .await
        .unwrap();

    let paradas = store.paradas_de(outcome.data.reparto.id);
    assert_eq!(paradas.len(), 1);
    assert_eq!(paradas[0].tipo, TipoParada::EntregaCliente);
    assert_eq!(paradas[0].orden, 0);
    assert!(outcome.info.iter().any(|i| i.contains("parada de retiro")));
}

#[tokio::test]
async fn test_lote_sin_geocodificador_crea_envio_sin_coordenadas() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let empresa = store.agregar_empresa(true);
    let cliente = store.agregar_cliente("Bruno", Some("Luro 3100"), None);

    let outcome = RepartoBuilder::new(store.clone())
        .crear_reparto_lote(lote(repartidor.id, empresa.id, vec![cliente.id]))
        .await
        .unwrap();

    let envio = store.envio(outcome.data.envios_creados[0]).unwrap();
    assert!(envio.coordenadas().is_none());
    assert_eq!(outcome.data.paradas.len(), 2);
}

#[tokio::test]
async fn test_lote_envio_fallido_no_deja_huecos() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let empresa = store.agregar_empresa(true);
    let clientes: Vec<Uuid> = ["Ana", "Bruno", "Carla"]
        .iter()
        .map(|n| store.agregar_cliente(n, Some("San Martín 2500"), Some((-38.0, -57.55))).id)
        .collect();
    store.fallar_en("insert_envio", 2);

    let outcome = RepartoBuilder::new(store.clone())
        .crear_reparto_lote(lote(repartidor.id, empresa.id, clientes))
        .await
        .unwrap();

    assert!(outcome.is_partial());
    assert_eq!(outcome.data.envios_creados.len(), 2);
    let ordenes: Vec<i32> = store
        .paradas_de(outcome.data.reparto.id)
        .iter()
        .map(|p| p.orden)
        .collect();
    assert_eq!(ordenes, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_lote_cliente_inexistente_se_omite() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let empresa = store.agregar_empresa(false);
    let fantasma = Uuid::new_v4();

    let outcome = RepartoBuilder::new(store.clone())
        .crear_reparto_lote(lote(repartidor.id, empresa.id, vec![fantasma]))
        .await
        .unwrap();

    assert_eq!(outcome.data.clientes_omitidos, vec![fantasma]);
    assert!(outcome.data.paradas.is_empty());
    assert!(!outcome.is_partial());
}

#[tokio::test]
async fn test_lote_sin_direcciones_queda_sin_paradas() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let empresa = store.agregar_empresa_sin_direccion();
    let ana = store.agregar_cliente("Ana", None, None);
    let bruno = store.agregar_cliente("Bruno", None, None);

    let outcome = RepartoBuilder::new(store.clone())
        .crear_reparto_lote(lote(repartidor.id, empresa.id, vec![ana.id, bruno.id]))
        .await
        .unwrap();

    let reparto_id = outcome.data.reparto.id;
    assert_eq!(outcome.data.reparto.tipo, TipoReparto::ViajeEmpresaLote);
    assert!(store.reparto(reparto_id).is_some());
    assert!(store.paradas_de(reparto_id).is_empty());
    assert!(outcome.data.paradas.is_empty());
    assert!(outcome.data.envios_creados.is_empty());
    assert_eq!(outcome.data.clientes_omitidos, vec![ana.id, bruno.id]);
    assert!(store.envios_del_reparto(reparto_id).is_empty());
    assert!(!outcome.is_partial());
    // Aviso de la empresa más uno por cliente
    assert_eq!(outcome.info.len(), 3);
}

#[tokio::test]
async fn test_lote_empresa_inexistente() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();

    let err = RepartoBuilder::new(store.clone())
        .crear_reparto_lote(lote(repartidor.id, Uuid::new_v4(), Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(store.cantidad_repartos(), 0);
}

#[tokio::test]
async fn test_precio_de_empresa_en_envios_generados() {
    let store = MemoryStore::new();
    let repartidor = store.agregar_repartidor();
    let empresa = store.agregar_empresa(false);
    let cliente = store.agregar_cliente("Ana", Some("Rivadavia 2400"), Some((-38.0, -57.55)));

    let outcome = RepartoBuilder::new(store.clone())
        .crear_reparto_lote(lote(repartidor.id, empresa.id, vec![cliente.id]))
        .await
        .unwrap();

    let envio = store.envio(outcome.data.envios_creados[0]).unwrap();
    assert_eq!(envio.precio_final, Some(Decimal::new(180000, 2)));
    assert_eq!(envio.cliente_id, Some(cliente.id));
}
