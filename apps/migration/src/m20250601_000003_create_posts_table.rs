use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_users_table::Users;
use super::m20250601_000002_create_groups_table::Groups;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Posts: author is mandatory and cascades, the group reference is nulled
/// out when the group goes away.
fn table_statement() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Posts::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Posts::AuthorId).big_integer().not_null())
        .col(ColumnDef::new(Posts::GroupId).big_integer().null())
        .col(ColumnDef::new(Posts::Text).text().not_null())
        .col(ColumnDef::new(Posts::Image).string().null())
        .col(
            ColumnDef::new(Posts::PubDate)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_author")
                .from(Posts::Table, Posts::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_group")
                .from(Posts::Table, Posts::GroupId)
                .to(Groups::Table, Groups::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(table_statement()).await?;

        // the feed sort key
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_feed")
                    .table(Posts::Table)
                    .col(Posts::PubDate)
                    .col(Posts::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_group")
                    .table(Posts::Table)
                    .col(Posts::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_author")
                    .table(Posts::Table)
                    .col(Posts::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Posts {
    Table,
    Id,
    AuthorId,
    GroupId,
    Text,
    Image,
    PubDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::sea_query::PostgresQueryBuilder;

    #[test]
    fn author_cascades_and_group_nullifies() {
        let sql = table_statement().to_string(PostgresQueryBuilder);
        assert!(sql.contains("ON DELETE CASCADE"));
        assert!(sql.contains("ON DELETE SET NULL"));
    }
}
