use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Setores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Setores::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Setores::Nome).string().not_null())
                    .col(ColumnDef::new(Setores::Descricao).text().null())
                    .col(ColumnDef::new(Setores::ResponsavelId).uuid().null())
                    .col(
                        ColumnDef::new(Setores::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Setores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_setores_responsavel_id")
                            .from(Setores::Table, Setores::ResponsavelId)
                            .to(
                                super::m20240610_000001_create_usuarios_table::Usuarios::Table,
                                super::m20240610_000001_create_usuarios_table::Usuarios::Id,
                            )
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Setores::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Setores {
    Table,
    Id,
    Nome,
    Descricao,
    ResponsavelId,
    Ativo,
    CreatedAt,
}
