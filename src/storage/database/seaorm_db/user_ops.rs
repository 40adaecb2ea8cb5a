use crate::core::models::User;
use crate::utils::error::{ForgeError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, user};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: uuid::Uuid) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", user_id);

        let user_model = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(ForgeError::Database)?;

        Ok(user_model.map(|model| model.to_domain()))
    }

    /// Find user by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        debug!("Finding user by email: {}", email);

        let user_model = entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(ForgeError::Database)?;

        Ok(user_model.map(|model| model.to_domain()))
    }

    /// Create a new user
    pub async fn create_user(&self, user: &User) -> Result<User> {
        debug!("Creating user: {}", user.id);

        let active_model = user::Model::from_domain(user);

        let _result = entities::User::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(ForgeError::Database)?;

        Ok(user.clone())
    }
}
