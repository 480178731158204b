use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn table_statement() -> TableCreateStatement {
    Table::create()
        .table(Follows::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Follows::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Follows::UserId).big_integer().not_null())
        .col(ColumnDef::new(Follows::AuthorId).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_follows_user")
                .from(Follows::Table, Follows::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_follows_author")
                .from(Follows::Table, Follows::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

/// One edge per (user, author) pair; the idempotent follow insert relies
/// on this index.
fn unique_pair_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_follows_user_author")
        .table(Follows::Table)
        .col(Follows::UserId)
        .col(Follows::AuthorId)
        .unique()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(table_statement()).await?;
        manager.create_index(unique_pair_index()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Follows::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Follows {
    Table,
    Id,
    UserId,
    AuthorId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::sea_query::PostgresQueryBuilder;

    #[test]
    fn pair_index_is_unique() {
        let sql = unique_pair_index().to_string(PostgresQueryBuilder);
        assert!(sql.contains("UNIQUE"));
        assert!(sql.contains("user_id"));
        assert!(sql.contains("author_id"));
    }
}
