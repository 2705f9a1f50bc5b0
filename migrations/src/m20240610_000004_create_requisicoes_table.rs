use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Requisicoes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requisicoes::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Requisicoes::Codigo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Requisicoes::SolicitanteId).uuid().not_null())
                    .col(ColumnDef::new(Requisicoes::SetorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Requisicoes::DataSolicitacao)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Requisicoes::DataEntregaPrevista)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Requisicoes::Turno).string().not_null())
                    .col(
                        ColumnDef::new(Requisicoes::Status)
                            .string()
                            .not_null()
                            .default("pendente"),
                    )
                    .col(ColumnDef::new(Requisicoes::Observacoes).text().null())
                    .col(ColumnDef::new(Requisicoes::AprovadoPor).uuid().null())
                    .col(
                        ColumnDef::new(Requisicoes::DataAprovacao)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Requisicoes::SeparadoPor).uuid().null())
                    .col(
                        ColumnDef::new(Requisicoes::DataSeparacao)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Requisicoes::EntreguePor).uuid().null())
                    .col(
                        ColumnDef::new(Requisicoes::DataEntrega)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Requisicoes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Requisicoes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requisicoes_solicitante_id")
                            .from(Requisicoes::Table, Requisicoes::SolicitanteId)
                            .to(
                                super::m20240610_000001_create_usuarios_table::Usuarios::Table,
                                super::m20240610_000001_create_usuarios_table::Usuarios::Id,
                            ),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requisicoes_setor_id")
                            .from(Requisicoes::Table, Requisicoes::SetorId)
                            .to(
                                super::m20240610_000002_create_setores_table::Setores::Table,
                                super::m20240610_000002_create_setores_table::Setores::Id,
                            ),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Requisicoes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Requisicoes {
    Table,
    Id,
    Codigo,
    SolicitanteId,
    SetorId,
    DataSolicitacao,
    DataEntregaPrevista,
    Turno,
    Status,
    Observacoes,
    AprovadoPor,
    DataAprovacao,
    SeparadoPor,
    DataSeparacao,
    EntreguePor,
    DataEntrega,
    CreatedAt,
    UpdatedAt,
}
