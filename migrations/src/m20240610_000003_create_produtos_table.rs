use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Produtos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Produtos::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Produtos::Nome).string().not_null())
                    .col(ColumnDef::new(Produtos::Categoria).string().not_null())
                    .col(ColumnDef::new(Produtos::Unidade).string().not_null())
                    .col(
                        ColumnDef::new(Produtos::EstoqueAtual)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Produtos::EstoqueMinimo)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Produtos::ConsumoMedioDiario)
                            .decimal()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Produtos::PrecoUnitario)
                            .decimal()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Produtos::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Produtos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Produtos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Produtos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Produtos {
    Table,
    Id,
    Nome,
    Categoria,
    Unidade,
    EstoqueAtual,
    EstoqueMinimo,
    ConsumoMedioDiario,
    PrecoUnitario,
    Ativo,
    CreatedAt,
    UpdatedAt,
}
