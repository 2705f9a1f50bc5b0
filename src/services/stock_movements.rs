use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    entities::product::{ActiveModel as ProductActiveModel, Entity as ProductEntity},
    entities::stock_movement::ActiveModel as MovementActiveModel,
    errors::ServiceError,
    models::MovementKind,
};

/// Records a delivery in the stock ledger: decrements the product stock and
/// appends the movement row with the before/after levels, atomically.
pub async fn record_delivery(
    db: &DatabaseConnection,
    produto_id: Uuid,
    requisicao_id: Uuid,
    quantity: i32,
    actor: Uuid,
) -> Result<(), ServiceError> {
    let txn = db.begin().await?;

    let product = ProductEntity::find_by_id(produto_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", produto_id)))?;

    let before = product.estoque_atual;
    let after = before - quantity;

    let mut active: ProductActiveModel = product.into();
    active.estoque_atual = Set(after);
    active.updated_at = Set(Some(Utc::now()));
    active.update(&txn).await?;

    let movement = MovementActiveModel {
        id: Set(Uuid::new_v4()),
        produto_id: Set(produto_id),
        tipo_movimentacao: Set(MovementKind::Entrega.as_str().to_string()),
        quantidade: Set(quantity),
        quantidade_anterior: Set(before),
        quantidade_atual: Set(after),
        requisicao_id: Set(Some(requisicao_id)),
        usuario_id: Set(actor),
        observacoes: Set(None),
        created_at: Set(Utc::now()),
    };
    movement.insert(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// The ledger is auxiliary state: failures are logged and never propagated
/// to the delivery confirmation that triggered them.
pub async fn record_delivery_best_effort(
    db: &DatabaseConnection,
    produto_id: Uuid,
    requisicao_id: Uuid,
    quantity: i32,
    actor: Uuid,
) {
    if let Err(e) = record_delivery(db, produto_id, requisicao_id, quantity, actor).await {
        warn!(
            produto_id = %produto_id,
            requisicao_id = %requisicao_id,
            error = %e,
            "Failed to record stock movement for delivery"
        );
    }
}
