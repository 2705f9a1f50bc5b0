use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MovimentacoesEstoque::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MovimentacoesEstoque::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MovimentacoesEstoque::ProdutoId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MovimentacoesEstoque::TipoMovimentacao)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MovimentacoesEstoque::Quantidade)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MovimentacoesEstoque::QuantidadeAnterior)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MovimentacoesEstoque::QuantidadeAtual)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MovimentacoesEstoque::RequisicaoId)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MovimentacoesEstoque::UsuarioId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MovimentacoesEstoque::Observacoes)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MovimentacoesEstoque::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movimentacoes_estoque_produto_id")
                            .from(MovimentacoesEstoque::Table, MovimentacoesEstoque::ProdutoId)
                            .to(
                                super::m20240610_000003_create_produtos_table::Produtos::Table,
                                super::m20240610_000003_create_produtos_table::Produtos::Id,
                            ),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movimentacoes_estoque_usuario_id")
                            .from(MovimentacoesEstoque::Table, MovimentacoesEstoque::UsuarioId)
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
            .drop_table(Table::drop().table(MovimentacoesEstoque::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MovimentacoesEstoque {
    Table,
    Id,
    ProdutoId,
    TipoMovimentacao,
    Quantidade,
    QuantidadeAnterior,
    QuantidadeAtual,
    RequisicaoId,
    UsuarioId,
    Observacoes,
    CreatedAt,
}
