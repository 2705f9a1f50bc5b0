use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::{product, requisition, requisition_history, requisition_item, sector, user},
    errors::ServiceError,
    models::{ItemStatus, RequisitionStatus},
};

/// Optional filters for the general requisition listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequisitionFilter {
    pub status: Option<RequisitionStatus>,
    pub solicitante_id: Option<Uuid>,
    pub setor_id: Option<Uuid>,
}

/// Optional filters for the separation and delivery work queues.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueFilter {
    /// Narrow the queue to one explicit status instead of its default set.
    pub status: Option<RequisitionStatus>,
    pub setor_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequisitionSummary {
    #[serde(flatten)]
    pub requisition: requisition::Model,
    pub solicitante_nome: String,
    pub setor_nome: String,
    pub total_itens: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeparationQueueEntry {
    #[serde(flatten)]
    pub requisition: requisition::Model,
    pub solicitante_nome: String,
    pub setor_nome: String,
    pub total_itens: u64,
    pub itens_pendentes: u64,
    pub itens_separados: u64,
    pub itens_em_falta: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryQueueEntry {
    #[serde(flatten)]
    pub requisition: requisition::Model,
    pub solicitante_nome: String,
    pub setor_nome: String,
    pub total_itens: u64,
    /// Items still awaiting delivery (separado or parcial).
    pub itens_pendentes_entrega: u64,
    pub itens_entregues: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemWithProduct {
    #[serde(flatten)]
    pub item: requisition_item::Model,
    pub produto_nome: String,
    pub unidade: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    #[serde(flatten)]
    pub entry: requisition_history::Model,
    pub usuario_nome: String,
}

/// Counters shown on the landing dashboard, over the last 30 days.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStats {
    pub requisicoes_hoje: u64,
    pub requisicoes_pendentes: u64,
    pub requisicoes_concluidas: u64,
}

/// Lists requisitions, newest first, with requester/sector names and item
/// counts attached.
#[instrument(skip(db))]
pub async fn list_requisitions(
    db: &DatabaseConnection,
    filter: &RequisitionFilter,
) -> Result<Vec<RequisitionSummary>, ServiceError> {
    let mut query =
        requisition::Entity::find().order_by_desc(requisition::Column::DataSolicitacao);

    if let Some(status) = filter.status {
        query = query.filter(requisition::Column::Status.eq(status.as_str()));
    }
    if let Some(solicitante_id) = filter.solicitante_id {
        query = query.filter(requisition::Column::SolicitanteId.eq(solicitante_id));
    }
    if let Some(setor_id) = filter.setor_id {
        query = query.filter(requisition::Column::SetorId.eq(setor_id));
    }

    let rows = query.all(db).await?;
    let names = NameLookup::load(db, &rows).await?;
    let tallies = item_status_lists(db, &rows).await?;

    Ok(rows
        .into_iter()
        .map(|requisition| {
            let total = tallies.get(&requisition.id).map_or(0, Vec::len) as u64;
            let (solicitante_nome, setor_nome) = names.resolve(&requisition);
            RequisitionSummary {
                requisition,
                solicitante_nome,
                setor_nome,
                total_itens: total,
            }
        })
        .collect())
}

/// Work queue for the stockroom: requisitions waiting for or undergoing
/// separation, ordered by promised delivery date.
#[instrument(skip(db))]
pub async fn separation_queue(
    db: &DatabaseConnection,
    filter: &QueueFilter,
) -> Result<Vec<SeparationQueueEntry>, ServiceError> {
    let statuses = filter.status.map_or_else(
        || {
            vec![
                RequisitionStatus::Pendente.as_str(),
                RequisitionStatus::EmSeparacao.as_str(),
            ]
        },
        |s| vec![s.as_str()],
    );

    let rows = queue_rows(db, statuses, filter.setor_id).await?;
    let names = NameLookup::load(db, &rows).await?;
    let tallies = item_status_lists(db, &rows).await?;

    Ok(rows
        .into_iter()
        .map(|requisition| {
            let statuses = tallies.get(&requisition.id).map_or(&[][..], Vec::as_slice);
            let (solicitante_nome, setor_nome) = names.resolve(&requisition);
            SeparationQueueEntry {
                total_itens: statuses.len() as u64,
                itens_pendentes: count(statuses, ItemStatus::Pendente),
                itens_separados: count(statuses, ItemStatus::Separado),
                itens_em_falta: count(statuses, ItemStatus::EmFalta),
                requisition,
                solicitante_nome,
                setor_nome,
            }
        })
        .collect())
}

/// Work queue for delivery: separated requisitions that still have at
/// least one deliverable item.
#[instrument(skip(db))]
pub async fn delivery_queue(
    db: &DatabaseConnection,
    filter: &QueueFilter,
) -> Result<Vec<DeliveryQueueEntry>, ServiceError> {
    let statuses = filter.status.map_or_else(
        || {
            vec![
                RequisitionStatus::Separado.as_str(),
                RequisitionStatus::EmEntrega.as_str(),
            ]
        },
        |s| vec![s.as_str()],
    );

    let rows = queue_rows(db, statuses, filter.setor_id).await?;
    let names = NameLookup::load(db, &rows).await?;
    let tallies = item_status_lists(db, &rows).await?;

    Ok(rows
        .into_iter()
        .filter_map(|requisition| {
            let statuses = tallies.get(&requisition.id).map_or(&[][..], Vec::as_slice);
            let deliverable = count(statuses, ItemStatus::Separado)
                + count(statuses, ItemStatus::Parcial);
            if deliverable == 0 {
                return None;
            }
            let (solicitante_nome, setor_nome) = names.resolve(&requisition);
            Some(DeliveryQueueEntry {
                total_itens: statuses.len() as u64,
                itens_pendentes_entrega: deliverable,
                itens_entregues: count(statuses, ItemStatus::Entregue),
                requisition,
                solicitante_nome,
                setor_nome,
            })
        })
        .collect())
}

/// Items of one requisition with product names attached, ordered by
/// product name.
#[instrument(skip(db), fields(requisicao_id = %requisicao_id))]
pub async fn requisition_items(
    db: &DatabaseConnection,
    requisicao_id: Uuid,
) -> Result<Vec<ItemWithProduct>, ServiceError> {
    let rows = requisition_item::Entity::find()
        .filter(requisition_item::Column::RequisicaoId.eq(requisicao_id))
        .find_also_related(product::Entity)
        .all(db)
        .await?;

    let mut items: Vec<ItemWithProduct> = rows
        .into_iter()
        .map(|(item, product)| {
            let (produto_nome, unidade) = product.map_or_else(
                || (String::new(), String::new()),
                |p| (p.nome, p.unidade),
            );
            ItemWithProduct {
                item,
                produto_nome,
                unidade,
            }
        })
        .collect();

    items.sort_by(|a, b| a.produto_nome.cmp(&b.produto_nome));

    Ok(items)
}

/// History of a requisition, newest first, with user names attached.
#[instrument(skip(db), fields(requisicao_id = %requisicao_id))]
pub async fn requisition_history(
    db: &DatabaseConnection,
    requisicao_id: Uuid,
) -> Result<Vec<HistoryRow>, ServiceError> {
    let rows = requisition_history::Entity::find()
        .filter(requisition_history::Column::RequisicaoId.eq(requisicao_id))
        .order_by_desc(requisition_history::Column::CreatedAt)
        .find_also_related(user::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(entry, user)| HistoryRow {
            entry,
            usuario_nome: user.map_or_else(String::new, |u| u.nome),
        })
        .collect())
}

/// Requisition counters over the last 30 days.
#[instrument(skip(db))]
pub async fn dashboard_stats(db: &DatabaseConnection) -> Result<DashboardStats, ServiceError> {
    let since = Utc::now() - Duration::days(30);
    let today = Utc::now().date_naive();

    let rows = requisition::Entity::find()
        .filter(requisition::Column::DataSolicitacao.gte(since))
        .all(db)
        .await?;

    let mut stats = DashboardStats::default();
    for row in &rows {
        if row.data_solicitacao.date_naive() == today {
            stats.requisicoes_hoje += 1;
        }
        match RequisitionStatus::from_str(&row.status) {
            Ok(RequisitionStatus::Pendente) | Ok(RequisitionStatus::EmSeparacao) => {
                stats.requisicoes_pendentes += 1
            }
            Ok(RequisitionStatus::Entregue) => stats.requisicoes_concluidas += 1,
            _ => {}
        }
    }

    Ok(stats)
}

/// Active products for the request form, grouped the way the catalog is
/// browsed.
#[instrument(skip(db))]
pub async fn active_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    Ok(product::Entity::find()
        .filter(product::Column::Ativo.eq(true))
        .order_by_asc(product::Column::Categoria)
        .order_by_asc(product::Column::Nome)
        .all(db)
        .await?)
}

/// Active sectors, alphabetical.
#[instrument(skip(db))]
pub async fn active_sectors(db: &DatabaseConnection) -> Result<Vec<sector::Model>, ServiceError> {
    Ok(sector::Entity::find()
        .filter(sector::Column::Ativo.eq(true))
        .order_by_asc(sector::Column::Nome)
        .all(db)
        .await?)
}

/// Looks up an active user by email. Absent or inactive users yield
/// `Ok(None)`.
#[instrument(skip(db, email))]
pub async fn find_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>, ServiceError> {
    Ok(user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .filter(user::Column::Ativo.eq(true))
        .one(db)
        .await?)
}

async fn queue_rows(
    db: &DatabaseConnection,
    statuses: Vec<&str>,
    setor_id: Option<Uuid>,
) -> Result<Vec<requisition::Model>, ServiceError> {
    let mut query = requisition::Entity::find()
        .filter(requisition::Column::Status.is_in(statuses))
        .order_by_asc(requisition::Column::DataEntregaPrevista)
        .order_by_asc(requisition::Column::CreatedAt);

    if let Some(setor_id) = setor_id {
        query = query.filter(requisition::Column::SetorId.eq(setor_id));
    }

    Ok(query.all(db).await?)
}

fn count(statuses: &[ItemStatus], wanted: ItemStatus) -> u64 {
    statuses.iter().filter(|s| **s == wanted).count() as u64
}

async fn item_status_lists(
    db: &DatabaseConnection,
    requisitions: &[requisition::Model],
) -> Result<HashMap<Uuid, Vec<ItemStatus>>, ServiceError> {
    if requisitions.is_empty() {
        return Ok(HashMap::new());
    }

    let ids: Vec<Uuid> = requisitions.iter().map(|r| r.id).collect();
    let items = requisition_item::Entity::find()
        .filter(requisition_item::Column::RequisicaoId.is_in(ids))
        .all(db)
        .await?;

    let mut map: HashMap<Uuid, Vec<ItemStatus>> = HashMap::new();
    for item in items {
        let status = ItemStatus::from_str(&item.status_item)
            .map_err(|_| ServiceError::InvalidStatus(item.status_item.clone()))?;
        map.entry(item.requisicao_id).or_default().push(status);
    }

    Ok(map)
}

/// Requester/sector display names for a batch of requisitions.
struct NameLookup {
    users: HashMap<Uuid, String>,
    sectors: HashMap<Uuid, String>,
}

impl NameLookup {
    async fn load(
        db: &DatabaseConnection,
        requisitions: &[requisition::Model],
    ) -> Result<Self, ServiceError> {
        if requisitions.is_empty() {
            return Ok(Self {
                users: HashMap::new(),
                sectors: HashMap::new(),
            });
        }

        let user_ids: Vec<Uuid> = requisitions.iter().map(|r| r.solicitante_id).collect();
        let sector_ids: Vec<Uuid> = requisitions.iter().map(|r| r.setor_id).collect();

        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.nome))
            .collect();

        let sectors = sector::Entity::find()
            .filter(sector::Column::Id.is_in(sector_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.nome))
            .collect();

        Ok(Self { users, sectors })
    }

    fn resolve(&self, requisition: &requisition::Model) -> (String, String) {
        (
            self.users
                .get(&requisition.solicitante_id)
                .cloned()
                .unwrap_or_default(),
            self.sectors
                .get(&requisition.setor_id)
                .cloned()
                .unwrap_or_default(),
        )
    }
}
