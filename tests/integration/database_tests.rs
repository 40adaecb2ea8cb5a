//! Database integration tests
//!
//! Tests database operations using real in-memory SQLite databases.

#[cfg(test)]
mod tests {
    use crate::common::database::{TestDatabase, test_db_config};
    use crate::common::fixtures::AccountFactory;
    use chrono::{Duration, Utc};
    use thumbforge::GenerationKind;
    use thumbforge::PromptAnswers;
    use thumbforge::core::models::HistoryRecord;
    use thumbforge::storage::database::Database;
    use uuid::Uuid;

    /// Test basic database connection and health check
    #[tokio::test]
    async fn test_database_health_check() {
        let db = Database::new(&test_db_config()).await;
        assert!(db.is_ok(), "Failed to create database: {:?}", db.err());

        let db = db.unwrap();
        let migrate_result = db.migrate().await;
        assert!(
            migrate_result.is_ok(),
            "Migration failed: {:?}",
            migrate_result.err()
        );

        let health = db.health_check().await;
        assert!(health.is_ok(), "Health check failed: {:?}", health.err());
    }

    /// Test user creation and lookup
    #[tokio::test]
    async fn test_user_operations() {
        let db = TestDatabase::new().await;
        let user = AccountFactory::user();

        let created = db.db().create_user(&user).await.unwrap();
        assert_eq!(created.id, user.id);

        let by_email = db.db().find_user_by_email(&user.email).await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));

        let by_id = db.db().find_user_by_id(user.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.email), Some(user.email.clone()));

        let missing = db.db().find_user_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    /// The unique index rejects a second account with the same email
    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let db = TestDatabase::new().await;
        let user = AccountFactory::user();
        db.db().create_user(&user).await.unwrap();

        let mut twin = AccountFactory::user();
        twin.email = user.email.clone();
        assert!(db.db().create_user(&twin).await.is_err());
    }

    /// History comes back newest first with all fields intact
    #[tokio::test]
    async fn test_history_round_trip_and_ordering() {
        let db = TestDatabase::new().await;
        let user = AccountFactory::user();
        db.db().create_user(&user).await.unwrap();

        let mut older = HistoryRecord::new(
            user.id,
            GenerationKind::TextToImage,
            "older prompt",
            None,
            false,
            PromptAnswers {
                category: Some("Gaming".to_string()),
                ..PromptAnswers::default()
            },
            None,
            vec!["/media/old.png".to_string()],
        );
        older.created_at = Utc::now() - Duration::minutes(5);

        let newer = HistoryRecord::new(
            user.id,
            GenerationKind::ImageToImage,
            "newer prompt",
            Some("extra style".to_string()),
            true,
            PromptAnswers::default(),
            None,
            vec!["/media/new-1.png".to_string(), "/media/new-2.png".to_string()],
        );

        db.db().insert_history(&older).await.unwrap();
        db.db().insert_history(&newer).await.unwrap();

        let history = db.db().list_history(user.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].original_prompt, "newer prompt");
        assert_eq!(history[1].original_prompt, "older prompt");

        assert_eq!(history[0].kind, GenerationKind::ImageToImage);
        assert_eq!(history[0].custom_prompt.as_deref(), Some("extra style"));
        assert!(history[0].enhance_prompt);
        assert_eq!(history[0].image_urls.len(), 2);
        assert_eq!(history[1].answers.category.as_deref(), Some("Gaming"));
    }

    /// Deleting with the wrong owner removes nothing
    #[tokio::test]
    async fn test_delete_is_scoped_to_owner() {
        let db = TestDatabase::new().await;
        let owner = AccountFactory::user();
        let stranger = AccountFactory::user();
        db.db().create_user(&owner).await.unwrap();
        db.db().create_user(&stranger).await.unwrap();

        let record = HistoryRecord::new(
            owner.id,
            GenerationKind::TextToImage,
            "a prompt",
            None,
            false,
            PromptAnswers::default(),
            None,
            vec![],
        );
        db.db().insert_history(&record).await.unwrap();

        assert!(!db.db().delete_history_item(stranger.id, record.id).await.unwrap());
        assert_eq!(db.db().list_history(owner.id).await.unwrap().len(), 1);

        assert!(db.db().delete_history_item(owner.id, record.id).await.unwrap());
        assert!(db.db().list_history(owner.id).await.unwrap().is_empty());

        // Gone means gone
        assert!(!db.db().delete_history_item(owner.id, record.id).await.unwrap());
    }

    /// Clearing reports how many rows went away
    #[tokio::test]
    async fn test_clear_history_counts_removed_rows() {
        let db = TestDatabase::new().await;
        let user = AccountFactory::user();
        db.db().create_user(&user).await.unwrap();

        for i in 0..3 {
            let record = HistoryRecord::new(
                user.id,
                GenerationKind::TextToImage,
                format!("prompt {}", i),
                None,
                false,
                PromptAnswers::default(),
                None,
                vec![],
            );
            db.db().insert_history(&record).await.unwrap();
        }

        assert_eq!(db.db().clear_history(user.id).await.unwrap(), 3);
        assert_eq!(db.db().clear_history(user.id).await.unwrap(), 0);
        assert!(db.db().list_history(user.id).await.unwrap().is_empty());
    }

    /// An unknown user simply has empty history
    #[tokio::test]
    async fn test_unknown_user_has_empty_history() {
        let db = TestDatabase::new().await;
        let history = db.db().list_history(Uuid::new_v4()).await.unwrap();
        assert!(history.is_empty());
    }
}
