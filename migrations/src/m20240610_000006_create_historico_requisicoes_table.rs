use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HistoricoRequisicoes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HistoricoRequisicoes::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoricoRequisicoes::RequisicaoId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoricoRequisicoes::UsuarioId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HistoricoRequisicoes::Acao).string().not_null())
                    .col(
                        ColumnDef::new(HistoricoRequisicoes::StatusAnterior)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HistoricoRequisicoes::StatusNovo)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(HistoricoRequisicoes::Detalhes).json().null())
                    .col(
                        ColumnDef::new(HistoricoRequisicoes::Observacoes)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HistoricoRequisicoes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_historico_requisicoes_requisicao_id")
                            .from(
                                HistoricoRequisicoes::Table,
                                HistoricoRequisicoes::RequisicaoId,
                            )
                            .to(
                                super::m20240610_000004_create_requisicoes_table::Requisicoes::Table,
                                super::m20240610_000004_create_requisicoes_table::Requisicoes::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_historico_requisicoes_usuario_id")
                            .from(HistoricoRequisicoes::Table, HistoricoRequisicoes::UsuarioId)
                            .to(
                                super::m20240610_000001_create_usuarios_table::Usuarios::Table,
                                super::m20240610_000001_create_usuarios_table::Usuarios::Id,
                            ),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HistoricoRequisicoes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum HistoricoRequisicoes {
    Table,
    Id,
    RequisicaoId,
    UsuarioId,
    Acao,
    StatusAnterior,
    StatusNovo,
    Detalhes,
    Observacoes,
    CreatedAt,
}
