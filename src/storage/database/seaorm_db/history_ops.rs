use crate::core::models::HistoryRecord;
use crate::utils::error::{ForgeError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, history_item};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Append a history record
    pub async fn insert_history(&self, record: &HistoryRecord) -> Result<HistoryRecord> {
        debug!("Inserting history record: {}", record.id);

        let active_model = history_item::Model::from_domain(record)?;

        let _result = entities::HistoryItem::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(ForgeError::Database)?;

        Ok(record.clone())
    }

    /// List a user's history, newest first
    pub async fn list_history(&self, user_id: uuid::Uuid) -> Result<Vec<HistoryRecord>> {
        debug!("Listing history for user: {}", user_id);

        let models = entities::HistoryItem::find()
            .filter(history_item::Column::UserId.eq(user_id))
            .order_by_desc(history_item::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(ForgeError::Database)?;

        models.iter().map(|model| model.to_domain()).collect()
    }

    /// Delete one of a user's history records.
    ///
    /// Returns whether a row was removed; a foreign or unknown id
    /// removes nothing.
    pub async fn delete_history_item(&self, user_id: uuid::Uuid, id: uuid::Uuid) -> Result<bool> {
        debug!("Deleting history record {} for user {}", id, user_id);

        let result = entities::HistoryItem::delete_many()
            .filter(history_item::Column::Id.eq(id))
            .filter(history_item::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(ForgeError::Database)?;

        Ok(result.rows_affected > 0)
    }

    /// Delete all of a user's history records, returning the count removed
    pub async fn clear_history(&self, user_id: uuid::Uuid) -> Result<u64> {
        debug!("Clearing history for user: {}", user_id);

        let result = entities::HistoryItem::delete_many()
            .filter(history_item::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(ForgeError::Database)?;

        Ok(result.rows_affected)
    }
}
