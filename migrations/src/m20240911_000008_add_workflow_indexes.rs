use sea_orm_migration::prelude::*;

use super::m20240610_000004_create_requisicoes_table::Requisicoes;
use super::m20240610_000005_create_requisicao_itens_table::RequisicaoItens;
use super::m20240610_000006_create_historico_requisicoes_table::HistoricoRequisicoes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Work queues filter by status and order by promised delivery date.
        manager
            .create_index(
                Index::create()
                    .name("idx_requisicoes_status_entrega")
                    .table(Requisicoes::Table)
                    .col(Requisicoes::Status)
                    .col(Requisicoes::DataEntregaPrevista)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requisicoes_setor_id")
                    .table(Requisicoes::Table)
                    .col(Requisicoes::SetorId)
                    .to_owned(),
            )
            .await?;

        // The status engine tallies items per requisition on every mutation.
        manager
            .create_index(
                Index::create()
                    .name("idx_requisicao_itens_requisicao_id")
                    .table(RequisicaoItens::Table)
                    .col(RequisicaoItens::RequisicaoId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_historico_requisicoes_requisicao_id")
                    .table(HistoricoRequisicoes::Table)
                    .col(HistoricoRequisicoes::RequisicaoId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_requisicoes_status_entrega")
                    .table(Requisicoes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_requisicoes_setor_id")
                    .table(Requisicoes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_requisicao_itens_requisicao_id")
                    .table(RequisicaoItens::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_historico_requisicoes_requisicao_id")
                    .table(HistoricoRequisicoes::Table)
                    .to_owned(),
            )
            .await
    }
}
