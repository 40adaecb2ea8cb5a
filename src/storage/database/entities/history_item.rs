use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::models::{HistoryRecord, InputImageMeta};
use crate::core::types::GenerationKind;
use crate::utils::error::{ForgeError, Result as ForgeResult};

/// Generation history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "history_items")]
pub struct Model {
    /// Record ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Generation kind ("text-to-image" or "image-to-image")
    pub kind: String,

    /// Prompt as the user typed it
    #[sea_orm(column_type = "Text")]
    pub original_prompt: String,

    /// Free-form extra instructions, if any
    #[sea_orm(column_type = "Text", nullable)]
    pub custom_prompt: Option<String>,

    /// Whether guided enhancement was requested
    pub enhance_prompt: bool,

    /// Guided prompt answers as JSON
    pub answers: Json,

    /// Uploaded reference image metadata as JSON, if any
    pub input_image: Option<Json>,

    /// Served URLs of the generated images as a JSON array
    pub image_urls: Json,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// History entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning user relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain history record
    pub fn to_domain(&self) -> ForgeResult<HistoryRecord> {
        let kind = GenerationKind::from_str(&self.kind)
            .map_err(|e| ForgeError::internal(format!("Corrupt history row: {}", e)))?;

        let answers = serde_json::from_value(self.answers.clone())?;
        let input_image: Option<InputImageMeta> = match &self.input_image {
            Some(value) => serde_json::from_value(value.clone())?,
            None => None,
        };
        let image_urls: Vec<String> = serde_json::from_value(self.image_urls.clone())?;

        Ok(HistoryRecord {
            id: self.id,
            user_id: self.user_id,
            kind,
            original_prompt: self.original_prompt.clone(),
            custom_prompt: self.custom_prompt.clone(),
            enhance_prompt: self.enhance_prompt,
            answers,
            input_image,
            image_urls,
            created_at: self.created_at.naive_utc().and_utc(),
        })
    }

    /// Convert domain history record to SeaORM active model
    pub fn from_domain(record: &HistoryRecord) -> ForgeResult<ActiveModel> {
        Ok(ActiveModel {
            id: Set(record.id),
            user_id: Set(record.user_id),
            kind: Set(record.kind.as_str().to_string()),
            original_prompt: Set(record.original_prompt.clone()),
            custom_prompt: Set(record.custom_prompt.clone()),
            enhance_prompt: Set(record.enhance_prompt),
            answers: Set(serde_json::to_value(&record.answers)?),
            input_image: Set(match &record.input_image {
                Some(meta) => Some(serde_json::to_value(meta)?),
                None => None,
            }),
            image_urls: Set(serde_json::to_value(&record.image_urls)?),
            created_at: Set(record.created_at.into()),
        })
    }
}
