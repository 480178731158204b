#[cfg(test)]
mod tests {
    use crate::database::entity::{group, post};
    use crate::database::postgres_repo::{PostgresGroupRepository, PostgresPostRepository};
    use quill_core::domain::Post;
    use quill_core::ports::{GroupRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_post_by_id() {
        let now = chrono::Utc::now();

        // Mock the query expectation
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: 7,
                author_id: 1,
                group_id: None,
                text: "Тестовый пост".to_owned(),
                image: Some("posts/forest.jpg".to_owned()),
                pub_date: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.text, "Тестовый пост");
        assert_eq!(post.id, 7);
        assert_eq!(post.image.as_deref(), Some("posts/forest.jpg"));
    }

    #[tokio::test]
    async fn test_find_group_by_slug() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![group::Model {
                id: 3,
                title: "Тестовая группа".to_owned(),
                slug: "test-slug".to_owned(),
                description: "Тестовое описание".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresGroupRepository::new(db);

        let found = repo.find_by_slug("test-slug").await.unwrap().unwrap();
        assert_eq!(found.id, 3);
        assert_eq!(found.title, "Тестовая группа");
    }
}
