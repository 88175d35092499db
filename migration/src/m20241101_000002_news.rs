use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsArticle::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NewsArticle::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(NewsArticle::Author)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(NewsArticle::Title).string_len(255).not_null())
                    .col(ColumnDef::new(NewsArticle::Content).text().not_null())
                    .col(
                        ColumnDef::new(NewsArticle::PublishedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NewsArticle::SourceUrl)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(NewsArticle::FetchedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_news_article_published_at")
                    .table(NewsArticle::Table)
                    .col(NewsArticle::PublishedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_news_article_source_url")
                    .table(NewsArticle::Table)
                    .col(NewsArticle::SourceUrl)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NewsArticle::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NewsArticle {
    Table,
    Id,
    Author,
    Title,
    Content,
    PublishedAt,
    SourceUrl,
    FetchedAt,
}
