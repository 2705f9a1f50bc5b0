use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::{
    entities::requisition_history::ActiveModel as HistoryActiveModel, errors::ServiceError,
};

/// One append-only history row.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub requisicao_id: Uuid,
    pub usuario_id: Uuid,
    pub acao: String,
    pub status_anterior: Option<String>,
    pub status_novo: Option<String>,
    pub detalhes: Option<Value>,
    pub observacoes: Option<String>,
}

impl HistoryEntry {
    pub fn status_change(
        requisicao_id: Uuid,
        usuario_id: Uuid,
        status_anterior: &str,
        status_novo: &str,
    ) -> Self {
        Self {
            requisicao_id,
            usuario_id,
            acao: "status_atualizado".to_string(),
            status_anterior: Some(status_anterior.to_string()),
            status_novo: Some(status_novo.to_string()),
            detalhes: None,
            observacoes: None,
        }
    }

    pub fn created(requisicao_id: Uuid, usuario_id: Uuid, item_count: usize) -> Self {
        Self {
            requisicao_id,
            usuario_id,
            acao: "requisicao_criada".to_string(),
            status_anterior: None,
            status_novo: Some("pendente".to_string()),
            detalhes: Some(serde_json::json!({ "total_itens": item_count })),
            observacoes: None,
        }
    }
}

/// Appends a history row.
pub async fn record(db: &DatabaseConnection, entry: HistoryEntry) -> Result<(), ServiceError> {
    let row = HistoryActiveModel {
        id: Set(Uuid::new_v4()),
        requisicao_id: Set(entry.requisicao_id),
        usuario_id: Set(entry.usuario_id),
        acao: Set(entry.acao),
        status_anterior: Set(entry.status_anterior),
        status_novo: Set(entry.status_novo),
        detalhes: Set(entry.detalhes),
        observacoes: Set(entry.observacoes),
        created_at: Set(Utc::now()),
    };

    row.insert(db).await?;
    Ok(())
}

/// History is auxiliary state: failures are logged and never propagated.
pub async fn record_best_effort(db: &DatabaseConnection, entry: HistoryEntry) {
    let requisicao_id = entry.requisicao_id;
    if let Err(e) = record(db, entry).await {
        warn!(requisicao_id = %requisicao_id, error = %e, "Failed to append requisition history row");
    }
}
