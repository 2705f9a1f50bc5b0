use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    entities::requisition_item::{
        ActiveModel as ItemActiveModel, Entity as ItemEntity, Model as ItemModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    models::ItemStatus,
    services::requisition_status::RequisitionStatusService,
    services::stock_movements,
};

/// Sparse field changes for one requisition item.
///
/// `None` means "leave the column untouched". For the free-text notes the
/// inner option distinguishes clearing (`Some(None)`) from absence.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub quantidade_separada: Option<i32>,
    pub quantidade_entregue: Option<i32>,
    pub status_item: Option<ItemStatus>,
    pub observacoes: Option<Option<String>>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.quantidade_separada.is_none()
            && self.quantidade_entregue.is_none()
            && self.status_item.is_none()
            && self.observacoes.is_none()
    }
}

/// Mutations against single requisition items: the separation and delivery
/// workflows act on one line at a time, and every change feeds the status
/// engine for the owning requisition afterwards.
#[derive(Clone)]
pub struct RequisitionItemService {
    db: Arc<DatabaseConnection>,
    status: RequisitionStatusService,
    event_sender: Option<Arc<EventSender>>,
}

impl RequisitionItemService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        status: RequisitionStatusService,
        event_sender: Option<Arc<EventSender>>,
    ) -> Self {
        Self {
            db,
            status,
            event_sender,
        }
    }

    /// Applies the provided field changes in a single update statement and
    /// re-derives the owning requisition's status (best-effort).
    ///
    /// An empty change set is a no-op and does not touch the database.
    #[instrument(skip(self, changes), fields(item_id = %item_id))]
    pub async fn update_item(
        &self,
        item_id: Uuid,
        changes: ItemChanges,
    ) -> Result<(), ServiceError> {
        if changes.is_empty() {
            return Ok(());
        }

        let item = self.load_item(item_id).await?;
        let requisicao_id = item.requisicao_id;

        self.apply_changes(item, &changes).await?;

        self.status.recompute_best_effort(requisicao_id).await;

        self.emit(Event::ItemUpdated {
            item_id,
            requisition_id: requisicao_id,
        })
        .await;

        Ok(())
    }

    /// Marks an item as unavailable: status em_falta, separated quantity
    /// zeroed. Closes the requisition when nothing further is deliverable.
    #[instrument(skip(self), fields(item_id = %item_id, actor = %actor))]
    pub async fn cancel_item(&self, item_id: Uuid, actor: Uuid) -> Result<(), ServiceError> {
        let item = self.load_item(item_id).await?;
        let requisicao_id = item.requisicao_id;

        self.apply_changes(
            item,
            &ItemChanges {
                status_item: Some(ItemStatus::EmFalta),
                quantidade_separada: Some(0),
                ..Default::default()
            },
        )
        .await?;

        self.status.recompute_best_effort(requisicao_id).await;
        self.status
            .close_if_fully_resolved(requisicao_id, Some(actor))
            .await?;

        info!(requisicao_id = %requisicao_id, "Item marked out of stock");

        self.emit(Event::ItemCancelled {
            item_id,
            requisition_id: requisicao_id,
        })
        .await;

        Ok(())
    }

    /// Confirms delivery of an item: status entregue, and BOTH the
    /// separated and delivered quantities are set to `quantity`. The
    /// previously separated quantity is overwritten on purpose; the
    /// confirmed amount is what effectively left the stockroom.
    ///
    /// Closes the requisition when nothing further is deliverable, and
    /// records the stock movement for the delivered amount (best-effort).
    #[instrument(skip(self), fields(item_id = %item_id, quantity = quantity, actor = %actor))]
    pub async fn confirm_delivery(
        &self,
        item_id: Uuid,
        quantity: i32,
        actor: Uuid,
    ) -> Result<(), ServiceError> {
        let item = self.load_item(item_id).await?;
        let requisicao_id = item.requisicao_id;
        let produto_id = item.produto_id;

        self.apply_changes(
            item,
            &ItemChanges {
                status_item: Some(ItemStatus::Entregue),
                quantidade_separada: Some(quantity),
                quantidade_entregue: Some(quantity),
                ..Default::default()
            },
        )
        .await?;

        self.status.recompute_best_effort(requisicao_id).await;
        self.status
            .close_if_fully_resolved(requisicao_id, Some(actor))
            .await?;

        stock_movements::record_delivery_best_effort(
            &self.db,
            produto_id,
            requisicao_id,
            quantity,
            actor,
        )
        .await;

        info!(requisicao_id = %requisicao_id, quantity = quantity, "Item delivery confirmed");

        self.emit(Event::ItemDeliveryConfirmed {
            item_id,
            requisition_id: requisicao_id,
            quantity,
        })
        .await;

        Ok(())
    }

    /// Adjusts the separated quantity of an item during the delivery stage,
    /// returning it to separado. The delivered quantity is left untouched
    /// and the closing rule is not evaluated.
    #[instrument(skip(self), fields(item_id = %item_id, quantity = quantity))]
    pub async fn edit_separated_quantity(
        &self,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<(), ServiceError> {
        self.update_item(
            item_id,
            ItemChanges {
                status_item: Some(ItemStatus::Separado),
                quantidade_separada: Some(quantity),
                ..Default::default()
            },
        )
        .await
    }

    async fn load_item(&self, item_id: Uuid) -> Result<ItemModel, ServiceError> {
        ItemEntity::find_by_id(item_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found_item(item_id))
    }

    async fn apply_changes(
        &self,
        item: ItemModel,
        changes: &ItemChanges,
    ) -> Result<(), ServiceError> {
        let mut active: ItemActiveModel = item.into();

        if let Some(quantity) = changes.quantidade_separada {
            active.quantidade_separada = Set(quantity);
        }
        if let Some(quantity) = changes.quantidade_entregue {
            active.quantidade_entregue = Set(quantity);
        }
        if let Some(status) = changes.status_item {
            active.status_item = Set(status.as_str().to_string());
        }
        if let Some(notes) = &changes.observacoes {
            active.observacoes = Set(notes.clone());
        }
        active.updated_at = Set(Some(Utc::now()));

        active.update(&*self.db).await?;
        Ok(())
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to emit item event");
            }
        }
    }
}
