use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stock requisition moving through pending → separation → delivery →
/// completion. Rows are never deleted; terminal states only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "requisicoes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    #[validate(length(min = 1, max = 32, message = "Requisition code must be between 1 and 32 characters"))]
    pub codigo: String,

    pub solicitante_id: Uuid,
    pub setor_id: Uuid,
    pub data_solicitacao: DateTime<Utc>,
    pub data_entrega_prevista: NaiveDate,
    /// Delivery window: manha, tarde or noite.
    pub turno: String,
    pub status: String,
    pub observacoes: Option<String>,

    // Stage stamps, filled by the administrative status override.
    pub aprovado_por: Option<Uuid>,
    pub data_aprovacao: Option<DateTime<Utc>>,
    pub separado_por: Option<Uuid>,
    pub data_separacao: Option<DateTime<Utc>>,
    pub entregue_por: Option<Uuid>,
    pub data_entrega: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::requisition_item::Entity")]
    Items,
    #[sea_orm(has_many = "super::requisition_history::Entity")]
    History,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SolicitanteId",
        to = "super::user::Column::Id"
    )]
    Requester,
    #[sea_orm(
        belongs_to = "super::sector::Entity",
        from = "Column::SetorId",
        to = "super::sector::Column::Id"
    )]
    Sector,
}

impl Related<super::requisition_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::requisition_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requester.def()
    }
}

impl Related<super::sector::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sector.def()
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
            if let ActiveValue::NotSet = active_model.data_solicitacao {
                active_model.data_solicitacao = Set(now);
            }
        }

        if let ActiveValue::NotSet = active_model.updated_at {
            active_model.updated_at = Set(Some(now));
        }

        Ok(active_model)
    }
}
