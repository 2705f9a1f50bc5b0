use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RequisicaoItens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequisicaoItens::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequisicaoItens::RequisicaoId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RequisicaoItens::ProdutoId).uuid().not_null())
                    .col(
                        ColumnDef::new(RequisicaoItens::QuantidadeSolicitada)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequisicaoItens::QuantidadeAtualEstoque)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RequisicaoItens::QuantidadeSeparada)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RequisicaoItens::QuantidadeEntregue)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RequisicaoItens::StatusItem)
                            .string()
                            .not_null()
                            .default("pendente"),
                    )
                    .col(ColumnDef::new(RequisicaoItens::Observacoes).text().null())
                    .col(
                        ColumnDef::new(RequisicaoItens::PrecoUnitario)
                            .decimal()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(RequisicaoItens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequisicaoItens::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requisicao_itens_requisicao_id")
                            .from(RequisicaoItens::Table, RequisicaoItens::RequisicaoId)
                            .to(
                                super::m20240610_000004_create_requisicoes_table::Requisicoes::Table,
                                super::m20240610_000004_create_requisicoes_table::Requisicoes::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requisicao_itens_produto_id")
                            .from(RequisicaoItens::Table, RequisicaoItens::ProdutoId)
                            .to(
                                super::m20240610_000003_create_produtos_table::Produtos::Table,
                                super::m20240610_000003_create_produtos_table::Produtos::Id,
                            ),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RequisicaoItens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RequisicaoItens {
    Table,
    Id,
    RequisicaoId,
    ProdutoId,
    QuantidadeSolicitada,
    QuantidadeAtualEstoque,
    QuantidadeSeparada,
    QuantidadeEntregue,
    StatusItem,
    Observacoes,
    PrecoUnitario,
    CreatedAt,
    UpdatedAt,
}
