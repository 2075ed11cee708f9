use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(posts_table()).await?;

        for index in posts_indexes() {
            manager.create_index(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Content,
    Author,
    CreatedAt,
    UpdatedAt,
}

fn posts_table() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Posts::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Posts::Title).string_len(255).not_null())
        .col(ColumnDef::new(Posts::Content).text().not_null())
        .col(ColumnDef::new(Posts::Author).string_len(100).not_null())
        .col(
            ColumnDef::new(Posts::CreatedAt)
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Posts::UpdatedAt)
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

/// The composite index serves the default `ORDER BY created_at DESC, id DESC`
/// and the `(created_at, id) < (..)` keyset predicate.
fn posts_indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .if_not_exists()
            .name("idx_posts_created_at")
            .table(Posts::Table)
            .col(Posts::CreatedAt)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_posts_author")
            .table(Posts::Table)
            .col(Posts::Author)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_posts_created_at_id")
            .table(Posts::Table)
            .col((Posts::CreatedAt, IndexOrder::Desc))
            .col((Posts::Id, IndexOrder::Desc))
            .to_owned(),
    ]
}
