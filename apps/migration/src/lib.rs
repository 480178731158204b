//! Schema migrations: users, groups, posts, comments, follows.

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_table;
mod m20250601_000002_create_groups_table;
mod m20250601_000003_create_posts_table;
mod m20250601_000004_create_comments_table;
mod m20250601_000005_create_follows_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_table::Migration),
            Box::new(m20250601_000002_create_groups_table::Migration),
            Box::new(m20250601_000003_create_posts_table::Migration),
            Box::new(m20250601_000004_create_comments_table::Migration),
            Box::new(m20250601_000005_create_follows_table::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_registered_in_dependency_order() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names.len(), 5);
        assert!(names[0].contains("users"));
        assert!(names[2].contains("posts"));
        assert!(names[4].contains("follows"));
    }
}
