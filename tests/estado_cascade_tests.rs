mod common;

use uuid::Uuid;

use common::MemoryStore;
use reparto_backoffice::models::envio::EstadoEnvio;
use reparto_backoffice::models::reparto::EstadoReparto;
use reparto_backoffice::services::estado_reparto_service::EstadoRepartoService;
use reparto_backoffice::utils::errors::AppError;

#[tokio::test]
async fn test_en_curso_pasa_envios_a_en_transito() {
    let store = MemoryStore::new();
    let (reparto, paradas) = store.agregar_reparto_con_paradas(3, true);

    let outcome = EstadoRepartoService::new(store.clone())
        .cambiar_estado(reparto.id, "en_curso", None)
        .await
        .unwrap();

    assert_eq!(outcome.data.reparto.estado, EstadoReparto::EnCurso);
    assert_eq!(outcome.data.estado_envios, EstadoEnvio::EnTransito);
    assert_eq!(outcome.data.envios_actualizados, 3);
    for parada in paradas.iter().filter(|p| p.envio_id.is_some()) {
        let envio = store.envio(parada.envio_id.unwrap()).unwrap();
        assert_eq!(envio.estado, EstadoEnvio::EnTransito);
    }
}

#[tokio::test]
async fn test_completado_con_lista_explicita() {
    let store = MemoryStore::new();
    let (reparto, paradas) = store.agregar_reparto_con_paradas(2, false);
    let elegido = paradas[0].envio_id.unwrap();
    let otro = paradas[1].envio_id.unwrap();

    let outcome = EstadoRepartoService::new(store.clone())
        .cambiar_estado(reparto.id, "completado", Some(vec![elegido]))
        .await
        .unwrap();

    assert_eq!(outcome.data.envios_actualizados, 1);
    assert_eq!(store.envio(elegido).unwrap().estado, EstadoEnvio::Entregado);
    assert_eq!(store.envio(otro).unwrap().estado, EstadoEnvio::AsignadoAReparto);
}

#[tokio::test]
async fn test_lista_vacia_solo_cambia_el_reparto() {
    let store = MemoryStore::new();
    let (reparto, paradas) = store.agregar_reparto_con_paradas(1, false);

    let outcome = EstadoRepartoService::new(store.clone())
        .cambiar_estado(reparto.id, "en_curso", Some(Vec::new()))
        .await
        .unwrap();

    assert_eq!(outcome.data.envios_actualizados, 0);
    assert_eq!(store.reparto(reparto.id).unwrap().estado, EstadoReparto::EnCurso);
    let envio = store.envio(paradas[0].envio_id.unwrap()).unwrap();
    assert_eq!(envio.estado, EstadoEnvio::AsignadoAReparto);
}

#[tokio::test]
async fn test_fallo_en_la_cascada_es_parcial() {
    let store = MemoryStore::new();
    let (reparto, _) = store.agregar_reparto_con_paradas(2, false);
    store.fallar_siempre("update_envios_estado");

    let outcome = EstadoRepartoService::new(store.clone())
        .cambiar_estado(reparto.id, "completado", None)
        .await
        .unwrap();

    assert!(outcome.is_partial());
    assert_eq!(outcome.data.envios_actualizados, 0);
    assert_eq!(store.reparto(reparto.id).unwrap().estado, EstadoReparto::Completado);
}

#[tokio::test]
async fn test_estado_invalido_no_toca_nada() {
    let store = MemoryStore::new();
    let (reparto, _) = store.agregar_reparto_con_paradas(1, false);

    let err = EstadoRepartoService::new(store.clone())
        .cambiar_estado(reparto.id, "cancelado", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(store.reparto(reparto.id).unwrap().estado, EstadoReparto::Asignado);
}

#[tokio::test]
async fn test_reparto_inexistente() {
    let store = MemoryStore::new();
    let err = EstadoRepartoService::new(store.clone())
        .cambiar_estado(Uuid::new_v4(), "en_curso", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
