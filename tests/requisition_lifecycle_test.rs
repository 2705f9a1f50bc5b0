//! End-to-end tests for the requisition lifecycle: creation, separation,
//! delivery and completion, driven through the public services against an
//! in-memory database.

mod common;

use common::TestApp;
use rust_decimal_macros::dec;

use almoxarifado_api::{
    models::{ItemStatus, RequisitionStatus},
    services::requisition_items::ItemChanges,
};

#[tokio::test]
async fn created_requisition_always_starts_pendente() {
    let app = TestApp::new().await;
    let requester = app.seed_user("Maria Silva", "maria@example.com").await;
    let sector = app.seed_sector("Cozinha").await;
    let rice = app.seed_product("Arroz", "Mercearia", 100, dec!(5.20)).await;

    let created = app
        .create_requisition(requester.id, sector.id, &[(&rice, 10)])
        .await;

    assert_eq!(created.requisition.status, "pendente");
    assert!(created.requisition.codigo.starts_with("REQ-"));
    assert_eq!(created.items.len(), 1);
    assert_eq!(created.items[0].status_item, "pendente");
    assert_eq!(created.items[0].quantidade_separada, 0);
    assert_eq!(created.items[0].quantidade_entregue, 0);
    assert_eq!(created.items[0].quantidade_atual_estoque, 100);
    assert_eq!(created.items[0].preco_unitario, dec!(5.20));
}

#[tokio::test]
async fn separation_of_first_item_moves_requisition_into_separation() {
    let app = TestApp::new().await;
    let requester = app.seed_user("Maria Silva", "maria@example.com").await;
    let sector = app.seed_sector("Cozinha").await;
    let rice = app.seed_product("Arroz", "Mercearia", 100, dec!(5.20)).await;
    let beans = app.seed_product("Feijão", "Mercearia", 80, dec!(7.00)).await;

    let created = app
        .create_requisition(requester.id, sector.id, &[(&rice, 10), (&beans, 5)])
        .await;
    let requisicao_id = created.requisition.id;

    app.state
        .items
        .update_item(
            created.items[0].id,
            ItemChanges {
                status_item: Some(ItemStatus::Separado),
                quantidade_separada: Some(10),
                ..Default::default()
            },
        )
        .await
        .expect("item update");

    // One item separated, one still pending: the requisition entered
    // separation and stays there.
    assert_eq!(app.requisition_status(requisicao_id).await, "em_separacao");
}

#[tokio::test]
async fn separating_every_item_closes_the_separation_stage() {
    let app = TestApp::new().await;
    let requester = app.seed_user("Maria Silva", "maria@example.com").await;
    let sector = app.seed_sector("Cozinha").await;
    let rice = app.seed_product("Arroz", "Mercearia", 100, dec!(5.20)).await;
    let beans = app.seed_product("Feijão", "Mercearia", 80, dec!(7.00)).await;

    let created = app
        .create_requisition(requester.id, sector.id, &[(&rice, 10), (&beans, 5)])
        .await;
    let requisicao_id = created.requisition.id;

    for item in &created.items {
        app.state
            .items
            .update_item(
                item.id,
                ItemChanges {
                    status_item: Some(ItemStatus::Separado),
                    quantidade_separada: Some(item.quantidade_solicitada),
                    ..Default::default()
                },
            )
            .await
            .expect("item update");
    }

    assert_eq!(app.requisition_status(requisicao_id).await, "separado");
}

#[tokio::test]
async fn delivery_progresses_through_em_entrega_to_entregue() {
    let app = TestApp::new().await;
    let requester = app.seed_user("Maria Silva", "maria@example.com").await;
    let deliverer = app.seed_user("João Souza", "joao@example.com").await;
    let sector = app.seed_sector("Cozinha").await;
    let rice = app.seed_product("Arroz", "Mercearia", 100, dec!(5.20)).await;
    let beans = app.seed_product("Feijão", "Mercearia", 80, dec!(7.00)).await;

    let created = app
        .create_requisition(requester.id, sector.id, &[(&rice, 10), (&beans, 5)])
        .await;
    let requisicao_id = created.requisition.id;

    for item in &created.items {
        app.state
            .items
            .update_item(
                item.id,
                ItemChanges {
                    status_item: Some(ItemStatus::Separado),
                    quantidade_separada: Some(item.quantidade_solicitada),
                    ..Default::default()
                },
            )
            .await
            .expect("item update");
    }
    assert_eq!(app.requisition_status(requisicao_id).await, "separado");

    // First delivery starts the delivery stage; the other item is still
    // separado, so the closing rule must not fire yet.
    app.state
        .items
        .confirm_delivery(created.items[0].id, 10, deliverer.id)
        .await
        .expect("delivery");
    assert_eq!(app.requisition_status(requisicao_id).await, "em_entrega");

    // Second delivery completes the requisition; the count-based rule and
    // the closing rule agree on entregue.
    app.state
        .items
        .confirm_delivery(created.items[1].id, 5, deliverer.id)
        .await
        .expect("delivery");
    assert_eq!(app.requisition_status(requisicao_id).await, "entregue");

    let first = app.item(created.items[0].id).await;
    assert_eq!(first.status_item, "entregue");
    assert_eq!(first.quantidade_separada, 10);
    assert_eq!(first.quantidade_entregue, 10);
}

#[tokio::test]
async fn recompute_is_idempotent_at_every_stage() {
    let app = TestApp::new().await;
    let requester = app.seed_user("Maria Silva", "maria@example.com").await;
    let sector = app.seed_sector("Cozinha").await;
    let rice = app.seed_product("Arroz", "Mercearia", 100, dec!(5.20)).await;
    let beans = app.seed_product("Feijão", "Mercearia", 80, dec!(7.00)).await;

    let created = app
        .create_requisition(requester.id, sector.id, &[(&rice, 10), (&beans, 5)])
        .await;
    let requisicao_id = created.requisition.id;

    // Freshly created: rule 1 applies once, then the guards go quiet.
    let first = app
        .state
        .status
        .recompute(requisicao_id)
        .await
        .expect("recompute");
    assert_eq!(first, Some(RequisitionStatus::EmSeparacao));

    let second = app
        .state
        .status
        .recompute(requisicao_id)
        .await
        .expect("recompute");
    assert_eq!(second, None);
    assert_eq!(app.requisition_status(requisicao_id).await, "em_separacao");

    // Settle the separation stage, then check again.
    for item in &created.items {
        app.state
            .items
            .update_item(
                item.id,
                ItemChanges {
                    status_item: Some(ItemStatus::Separado),
                    quantidade_separada: Some(item.quantidade_solicitada),
                    ..Default::default()
                },
            )
            .await
            .expect("item update");
    }
    assert_eq!(app.requisition_status(requisicao_id).await, "separado");
    let again = app
        .state
        .status
        .recompute(requisicao_id)
        .await
        .expect("recompute");
    assert_eq!(again, None);
    assert_eq!(app.requisition_status(requisicao_id).await, "separado");
}

#[tokio::test]
async fn administrative_override_stamps_actor_and_timestamp() {
    let app = TestApp::new().await;
    let requester = app.seed_user("Maria Silva", "maria@example.com").await;
    let approver = app.seed_user("Ana Lima", "ana@example.com").await;
    let sector = app.seed_sector("Cozinha").await;
    let rice = app.seed_product("Arroz", "Mercearia", 100, dec!(5.20)).await;

    let created = app
        .create_requisition(requester.id, sector.id, &[(&rice, 10)])
        .await;
    let requisicao_id = created.requisition.id;

    app.state
        .status
        .set_status(requisicao_id, RequisitionStatus::Aprovada, Some(approver.id))
        .await
        .expect("override");

    let requisition = app.requisition(requisicao_id).await;
    assert_eq!(requisition.status, "aprovada");
    assert_eq!(requisition.aprovado_por, Some(approver.id));
    assert!(requisition.data_aprovacao.is_some());
    assert_eq!(requisition.separado_por, None);

    // Without an actor only the status column moves.
    app.state
        .status
        .set_status(requisicao_id, RequisitionStatus::Separado, None)
        .await
        .expect("override");

    let requisition = app.requisition(requisicao_id).await;
    assert_eq!(requisition.status, "separado");
    assert_eq!(requisition.separado_por, None);
    assert_eq!(requisition.data_separacao, None);
}

#[tokio::test]
async fn get_requisition_returns_none_for_unknown_id() {
    let app = TestApp::new().await;
    let found = app
        .state
        .requisitions
        .get_requisition(uuid::Uuid::new_v4())
        .await
        .expect("lookup");
    assert!(found.is_none());
}
