pub use sea_orm_migration::prelude::*;

mod m20240610_000001_create_usuarios_table;
mod m20240610_000002_create_setores_table;
mod m20240610_000003_create_produtos_table;
mod m20240610_000004_create_requisicoes_table;
mod m20240610_000005_create_requisicao_itens_table;
mod m20240610_000006_create_historico_requisicoes_table;
mod m20240610_000007_create_movimentacoes_estoque_table;
mod m20240911_000008_add_workflow_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240610_000001_create_usuarios_table::Migration),
            Box::new(m20240610_000002_create_setores_table::Migration),
            Box::new(m20240610_000003_create_produtos_table::Migration),
            Box::new(m20240610_000004_create_requisicoes_table::Migration),
            Box::new(m20240610_000005_create_requisicao_itens_table::Migration),
            Box::new(m20240610_000006_create_historico_requisicoes_table::Migration),
            Box::new(m20240610_000007_create_movimentacoes_estoque_table::Migration),
            Box::new(m20240911_000008_add_workflow_indexes::Migration),
        ]
    }
}
