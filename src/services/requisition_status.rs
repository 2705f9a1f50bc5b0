use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    entities::requisition::{ActiveModel as RequisitionActiveModel, Entity as RequisitionEntity},
    entities::requisition_item::{self, Entity as ItemEntity},
    errors::ServiceError,
    events::{Event, EventSender},
    models::{ItemStatus, RequisitionStatus},
    services::history::{self, HistoryEntry},
};

/// Aggregated item-status counts for one requisition.
///
/// `parcial` items count toward `total` only; the guard rules never look at
/// them directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemStatusTally {
    pub total: usize,
    pub pending: usize,
    pub separated: usize,
    pub delivered: usize,
    pub out_of_stock: usize,
}

impl ItemStatusTally {
    pub fn from_statuses(statuses: impl IntoIterator<Item = ItemStatus>) -> Self {
        let mut tally = ItemStatusTally::default();
        for status in statuses {
            tally.total += 1;
            match status {
                ItemStatus::Pendente => tally.pending += 1,
                ItemStatus::Separado => tally.separated += 1,
                ItemStatus::Entregue => tally.delivered += 1,
                ItemStatus::EmFalta => tally.out_of_stock += 1,
                ItemStatus::Parcial => {}
            }
        }
        tally
    }

    /// Ordered guard rules for advancing a requisition, first match wins.
    ///
    /// Returns the status to move to, or `None` when no guard holds (the
    /// stored status is left as is). At most one transition is applied per
    /// evaluation; callers re-evaluate after the next item change.
    pub fn next_status(&self, current: RequisitionStatus) -> Option<RequisitionStatus> {
        if self.pending > 0 && current == RequisitionStatus::Pendente {
            Some(RequisitionStatus::EmSeparacao)
        } else if self.pending == 0
            && (self.separated > 0 || self.out_of_stock > 0)
            && current == RequisitionStatus::EmSeparacao
        {
            Some(RequisitionStatus::Separado)
        } else if self.delivered > 0 && current == RequisitionStatus::Separado {
            Some(RequisitionStatus::EmEntrega)
        } else if self.delivered == self.total && current == RequisitionStatus::EmEntrega {
            Some(RequisitionStatus::Entregue)
        } else {
            None
        }
    }
}

/// Derives requisition-level status from item-level state.
///
/// Two paths exist: the count-based recompute that runs after every item
/// mutation, and the closing rule that force-completes a requisition once
/// nothing further is deliverable. Administrative overrides (`set_status`)
/// bypass the guards entirely.
#[derive(Clone)]
pub struct RequisitionStatusService {
    db: Arc<DatabaseConnection>,
    event_sender: Option<Arc<EventSender>>,
}

impl RequisitionStatusService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self { db, event_sender }
    }

    /// Re-derives the requisition status from its items' statuses.
    ///
    /// Reads the item tally and the stored status, applies the guard rules
    /// and issues at most one update. Returns the transition that was
    /// applied, if any.
    #[instrument(skip(self), fields(requisicao_id = %requisicao_id))]
    pub async fn recompute(
        &self,
        requisicao_id: Uuid,
    ) -> Result<Option<RequisitionStatus>, ServiceError> {
        let requisition = RequisitionEntity::find_by_id(requisicao_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found_requisition(requisicao_id))?;

        let current = RequisitionStatus::from_str(&requisition.status)
            .map_err(|_| ServiceError::InvalidStatus(requisition.status.clone()))?;

        let tally = self.load_tally(requisicao_id).await?;

        let Some(next) = tally.next_status(current) else {
            return Ok(None);
        };

        let mut active: RequisitionActiveModel = requisition.into();
        active.status = Set(next.as_str().to_string());
        active.updated_at = Set(Some(Utc::now()));
        active.update(&*self.db).await?;

        info!(from = %current, to = %next, "Requisition status advanced");

        self.emit_status_changed(requisicao_id, current, next).await;

        Ok(Some(next))
    }

    /// Recompute as fired after item mutations: any error is logged and
    /// swallowed, leaving the stored status stale rather than failing the
    /// mutation that triggered it.
    pub async fn recompute_best_effort(&self, requisicao_id: Uuid) {
        if let Err(e) = self.recompute(requisicao_id).await {
            error!(requisicao_id = %requisicao_id, error = %e, "Status recompute failed; stored status left untouched");
        }
    }

    /// Closing rule: once every item is entregue or em_falta, the
    /// requisition is force-set to entregue regardless of the guard rules.
    ///
    /// Returns whether the requisition was closed. A requisition without
    /// items is never closed.
    #[instrument(skip(self), fields(requisicao_id = %requisicao_id))]
    pub async fn close_if_fully_resolved(
        &self,
        requisicao_id: Uuid,
        actor: Option<Uuid>,
    ) -> Result<bool, ServiceError> {
        let statuses = self.load_item_statuses(requisicao_id).await?;

        if statuses.is_empty() || !statuses.iter().all(ItemStatus::is_resolved) {
            return Ok(false);
        }

        self.set_status(requisicao_id, RequisitionStatus::Entregue, actor)
            .await?;

        Ok(true)
    }

    /// Administrative status override: an unconditional write that bypasses
    /// the guard rules, used for manual stage advancement.
    ///
    /// For aprovada/separado/entregue with an actor present, the matching
    /// actor/timestamp pair is stamped alongside the status.
    #[instrument(skip(self), fields(requisicao_id = %requisicao_id, new_status = %status))]
    pub async fn set_status(
        &self,
        requisicao_id: Uuid,
        status: RequisitionStatus,
        actor: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let requisition = RequisitionEntity::find_by_id(requisicao_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found_requisition(requisicao_id))?;

        let old_status = requisition.status.clone();
        let now = Utc::now();

        let mut active: RequisitionActiveModel = requisition.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Some(now));

        if let Some(actor_id) = actor {
            match status {
                RequisitionStatus::Aprovada => {
                    active.aprovado_por = Set(Some(actor_id));
                    active.data_aprovacao = Set(Some(now));
                }
                RequisitionStatus::Separado => {
                    active.separado_por = Set(Some(actor_id));
                    active.data_separacao = Set(Some(now));
                }
                RequisitionStatus::Entregue => {
                    active.entregue_por = Set(Some(actor_id));
                    active.data_entrega = Set(Some(now));
                }
                _ => {}
            }
        }

        active.update(&*self.db).await?;

        info!(from = %old_status, to = %status, "Requisition status set");

        if let Some(actor_id) = actor {
            history::record_best_effort(
                &self.db,
                HistoryEntry::status_change(requisicao_id, actor_id, &old_status, status.as_str()),
            )
            .await;
        }

        if let Ok(old) = RequisitionStatus::from_str(&old_status) {
            self.emit_status_changed(requisicao_id, old, status).await;
        }

        Ok(())
    }

    async fn load_tally(&self, requisicao_id: Uuid) -> Result<ItemStatusTally, ServiceError> {
        let statuses = self.load_item_statuses(requisicao_id).await?;
        Ok(ItemStatusTally::from_statuses(statuses))
    }

    async fn load_item_statuses(
        &self,
        requisicao_id: Uuid,
    ) -> Result<Vec<ItemStatus>, ServiceError> {
        let items = ItemEntity::find()
            .filter(requisition_item::Column::RequisicaoId.eq(requisicao_id))
            .all(&*self.db)
            .await?;

        items
            .iter()
            .map(|item| {
                ItemStatus::from_str(&item.status_item)
                    .map_err(|_| ServiceError::InvalidStatus(item.status_item.clone()))
            })
            .collect()
    }

    async fn emit_status_changed(
        &self,
        requisicao_id: Uuid,
        old: RequisitionStatus,
        new: RequisitionStatus,
    ) {
        if let Some(sender) = &self.event_sender {
            let event = Event::RequisitionStatusChanged {
                requisition_id: requisicao_id,
                old_status: old.as_str().to_string(),
                new_status: new.as_str().to_string(),
            };
            if let Err(e) = sender.send(event).await {
                warn!(requisicao_id = %requisicao_id, error = %e, "Failed to emit status change event");
            }
        }
    }
}
