use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::requisition::{
        ActiveModel as RequisitionActiveModel, Entity as RequisitionEntity,
        Model as RequisitionModel,
    },
    entities::requisition_item::{
        self, ActiveModel as ItemActiveModel, Entity as ItemEntity, Model as ItemModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    models::{RequisitionStatus, Shift},
    services::history::{self, HistoryEntry},
};

/// Payload for submitting a new requisition.
///
/// There is deliberately no status field: every requisition starts as
/// pendente no matter what the caller intends.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRequisitionRequest {
    pub setor_id: Uuid,
    pub data_entrega_prevista: NaiveDate,
    pub turno: Shift,
    pub observacoes: Option<String>,
    #[validate(length(min = 1, message = "A requisition needs at least one item"))]
    pub itens: Vec<NewRequisitionItem>,
}

/// One line of a new requisition. Stock and price are snapshots taken by
/// the caller at request time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewRequisitionItem {
    pub produto_id: Uuid,
    #[validate(range(min = 1, message = "Requested quantity must be at least 1"))]
    pub quantidade_solicitada: i32,
    pub quantidade_atual_estoque: i32,
    pub preco_unitario: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequisitionWithItems {
    pub requisition: RequisitionModel,
    pub items: Vec<ItemModel>,
}

/// Requisition-level mutations: submission and lookup. Status overrides
/// live in [`super::requisition_status::RequisitionStatusService`].
#[derive(Clone)]
pub struct RequisitionService {
    db: Arc<DatabaseConnection>,
    event_sender: Option<Arc<EventSender>>,
}

impl RequisitionService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self { db, event_sender }
    }

    /// Creates a requisition and its line items in one transaction.
    ///
    /// The header is inserted with status pendente; each item starts
    /// pendente with zeroed separated/delivered quantities. Any insert
    /// failure rolls the whole submission back.
    #[instrument(skip(self, request), fields(actor = %actor, setor_id = %request.setor_id, item_count = request.itens.len()))]
    pub async fn create_requisition(
        &self,
        actor: Uuid,
        request: CreateRequisitionRequest,
    ) -> Result<RequisitionWithItems, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;
        for line in &request.itens {
            line.validate()
                .map_err(|e| ServiceError::ValidationError(e.to_string()))?;
        }

        let now = Utc::now();
        let requisicao_id = Uuid::new_v4();
        let codigo = generate_codigo(requisicao_id);

        let txn = self.db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for requisition creation");
            ServiceError::DatabaseError(e)
        })?;

        let header = RequisitionActiveModel {
            id: Set(requisicao_id),
            codigo: Set(codigo.clone()),
            solicitante_id: Set(actor),
            setor_id: Set(request.setor_id),
            data_solicitacao: Set(now),
            data_entrega_prevista: Set(request.data_entrega_prevista),
            turno: Set(request.turno.as_str().to_string()),
            status: Set(RequisitionStatus::Pendente.as_str().to_string()),
            observacoes: Set(request.observacoes.clone()),
            aprovado_por: Set(None),
            data_aprovacao: Set(None),
            separado_por: Set(None),
            data_separacao: Set(None),
            entregue_por: Set(None),
            data_entrega: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let requisition = header.insert(&txn).await.map_err(|e| {
            error!(error = %e, requisicao_id = %requisicao_id, "Failed to insert requisition");
            ServiceError::DatabaseError(e)
        })?;

        let mut items = Vec::with_capacity(request.itens.len());
        for line in &request.itens {
            let item = ItemActiveModel {
                id: Set(Uuid::new_v4()),
                requisicao_id: Set(requisicao_id),
                produto_id: Set(line.produto_id),
                quantidade_solicitada: Set(line.quantidade_solicitada),
                quantidade_atual_estoque: Set(line.quantidade_atual_estoque),
                quantidade_separada: Set(0),
                quantidade_entregue: Set(0),
                status_item: Set(crate::models::ItemStatus::Pendente.as_str().to_string()),
                observacoes: Set(None),
                preco_unitario: Set(line.preco_unitario),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };

            let inserted = item.insert(&txn).await.map_err(|e| {
                error!(error = %e, requisicao_id = %requisicao_id, produto_id = %line.produto_id, "Failed to insert requisition item");
                ServiceError::DatabaseError(e)
            })?;
            items.push(inserted);
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, requisicao_id = %requisicao_id, "Failed to commit requisition creation");
            ServiceError::DatabaseError(e)
        })?;

        info!(requisicao_id = %requisicao_id, codigo = %codigo, "Requisition created");

        history::record_best_effort(
            &self.db,
            HistoryEntry::created(requisicao_id, actor, items.len()),
        )
        .await;

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(Event::RequisitionCreated(requisicao_id)).await {
                warn!(error = %e, requisicao_id = %requisicao_id, "Failed to emit requisition created event");
            }
        }

        Ok(RequisitionWithItems { requisition, items })
    }

    /// Fetches a requisition and its items. Absent requisitions yield
    /// `Ok(None)`, not an error.
    #[instrument(skip(self), fields(requisicao_id = %requisicao_id))]
    pub async fn get_requisition(
        &self,
        requisicao_id: Uuid,
    ) -> Result<Option<RequisitionWithItems>, ServiceError> {
        let Some(requisition) = RequisitionEntity::find_by_id(requisicao_id)
            .one(&*self.db)
            .await?
        else {
            return Ok(None);
        };

        let items = ItemEntity::find()
            .filter(requisition_item::Column::RequisicaoId.eq(requisicao_id))
            .all(&*self.db)
            .await?;

        Ok(Some(RequisitionWithItems { requisition, items }))
    }
}

/// Human-facing requisition code, derived from the first 32 bits of the id.
fn generate_codigo(id: Uuid) -> String {
    format!("REQ-{:08X}", id.as_fields().0)
}
