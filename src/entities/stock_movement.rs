use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stock movement ledger row. `quantidade_anterior`/`quantidade_atual`
/// record the product stock level around the movement.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movimentacoes_estoque")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub produto_id: Uuid,
    /// One of: entrada, saida, ajuste, separacao, entrega.
    pub tipo_movimentacao: String,
    pub quantidade: i32,
    pub quantidade_anterior: i32,
    pub quantidade_atual: i32,
    pub requisicao_id: Option<Uuid>,
    pub usuario_id: Uuid,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProdutoId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
