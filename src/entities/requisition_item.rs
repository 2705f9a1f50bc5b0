use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One product line within a requisition. Owned exclusively by its
/// requisition; quantities are snapshots taken at request time except for
/// the separated/delivered pair maintained by the workflow.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requisicao_itens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub requisicao_id: Uuid,
    pub produto_id: Uuid,
    pub quantidade_solicitada: i32,
    /// Stock level of the product when the requisition was submitted.
    pub quantidade_atual_estoque: i32,
    pub quantidade_separada: i32,
    pub quantidade_entregue: i32,
    pub status_item: String,
    pub observacoes: Option<String>,
    /// Unit price snapshot taken at request time.
    pub preco_unitario: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::requisition::Entity",
        from = "Column::RequisicaoId",
        to = "super::requisition::Column::Id"
    )]
    Requisition,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProdutoId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::requisition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requisition.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        let now = Utc::now();

        if insert {
            if let ActiveValue::NotSet = active_model.created_at {
                active_model.created_at = Set(now);
            }
        }

        if let ActiveValue::NotSet = active_model.updated_at {
            active_model.updated_at = Set(Some(now));
        }

        Ok(active_model)
    }
}
