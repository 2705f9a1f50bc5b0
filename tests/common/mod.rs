// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use almoxarifado_api::{
    config::AppConfig,
    db::{self, DbConfig},
    entities::{product, requisition, requisition_item, sector, user},
    events,
    services::requisitions::{CreateRequisitionRequest, NewRequisitionItem},
    AppState,
};

/// Test harness backed by an in-memory SQLite database with the real
/// migrations applied. The pool is pinned to one connection so the
/// in-memory database survives for the whole test.
pub struct TestApp {
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        let cfg = AppConfig::new("sqlite::memory:".to_string(), "test".to_string());

        let mut db_cfg = DbConfig::from(&cfg);
        db_cfg.max_connections = 1;
        db_cfg.min_connections = 1;

        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool).await.expect("failed to migrate");

        let (sender, mut rx) = events::channel(64);
        let event_task = tokio::spawn(async move { while rx.recv().await.is_some() {} });

        let state = AppState::new(Arc::new(pool), cfg, sender);

        Self {
            state,
            _event_task: event_task,
        }
    }

    pub fn db(&self) -> &sea_orm::DatabaseConnection {
        &self.state.db
    }

    pub async fn seed_user(&self, nome: &str, email: &str) -> user::Model {
        user::ActiveModel {
            id: Set(Uuid::new_v4()),
            nome: Set(nome.to_string()),
            email: Set(email.to_string()),
            senha_hash: Set("hash".to_string()),
            tipo_usuario: Set("solicitante".to_string()),
            setor: Set(None),
            ativo: Set(true),
            created_at: Set(Utc::now()),
            updated_at: Set(Some(Utc::now())),
        }
        .insert(self.db())
        .await
        .expect("failed to seed user")
    }

    pub async fn seed_sector(&self, nome: &str) -> sector::Model {
        sector::ActiveModel {
            id: Set(Uuid::new_v4()),
            nome: Set(nome.to_string()),
            descricao: Set(None),
            responsavel_id: Set(None),
            ativo: Set(true),
            created_at: Set(Utc::now()),
        }
        .insert(self.db())
        .await
        .expect("failed to seed sector")
    }

    pub async fn seed_product(
        &self,
        nome: &str,
        categoria: &str,
        estoque_atual: i32,
        preco_unitario: Decimal,
    ) -> product::Model {
        product::ActiveModel {
            id: Set(Uuid::new_v4()),
            nome: Set(nome.to_string()),
            categoria: Set(categoria.to_string()),
            unidade: Set("un".to_string()),
            estoque_atual: Set(estoque_atual),
            estoque_minimo: Set(0),
            consumo_medio_diario: Set(Decimal::ZERO),
            preco_unitario: Set(preco_unitario),
            ativo: Set(true),
            created_at: Set(Utc::now()),
            updated_at: Set(Some(Utc::now())),
        }
        .insert(self.db())
        .await
        .expect("failed to seed product")
    }

    /// Creates a requisition for the given products, one item per product
    /// with the product's current stock and price as snapshots.
    pub async fn create_requisition(
        &self,
        actor: Uuid,
        setor_id: Uuid,
        products: &[(&product::Model, i32)],
    ) -> almoxarifado_api::services::requisitions::RequisitionWithItems {
        let request = CreateRequisitionRequest {
            setor_id,
            data_entrega_prevista: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            turno: almoxarifado_api::models::Shift::Manha,
            observacoes: None,
            itens: products
                .iter()
                .map(|(p, qty)| NewRequisitionItem {
                    produto_id: p.id,
                    quantidade_solicitada: *qty,
                    quantidade_atual_estoque: p.estoque_atual,
                    preco_unitario: p.preco_unitario,
                })
                .collect(),
        };

        self.state
            .requisitions
            .create_requisition(actor, request)
            .await
            .expect("failed to create requisition")
    }

    pub async fn requisition_status(&self, requisicao_id: Uuid) -> String {
        requisition::Entity::find_by_id(requisicao_id)
            .one(self.db())
            .await
            .expect("query failed")
            .expect("requisition exists")
            .status
    }

    pub async fn requisition(&self, requisicao_id: Uuid) -> requisition::Model {
        requisition::Entity::find_by_id(requisicao_id)
            .one(self.db())
            .await
            .expect("query failed")
            .expect("requisition exists")
    }

    pub async fn item(&self, item_id: Uuid) -> requisition_item::Model {
        requisition_item::Entity::find_by_id(item_id)
            .one(self.db())
            .await
            .expect("query failed")
            .expect("item exists")
    }

    #[allow(dead_code)]
    pub async fn items_of(&self, requisicao_id: Uuid) -> Vec<requisition_item::Model> {
        requisition_item::Entity::find()
            .filter(requisition_item::Column::RequisicaoId.eq(requisicao_id))
            .all(self.db())
            .await
            .expect("query failed")
    }
}
