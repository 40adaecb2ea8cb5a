//! Domain models shared between storage, server, and SDK

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::prompt::PromptAnswers;
use super::types::GenerationKind;

/// A registered account
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a freshly minted id
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Projection safe to put on the wire
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The subset of account fields exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Metadata about an uploaded reference image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputImageMeta {
    pub name: String,
    pub size: u64,
}

/// One recorded generation event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    /// Owner; not part of the wire representation
    #[serde(skip)]
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: GenerationKind,
    pub original_prompt: String,
    pub custom_prompt: Option<String>,
    pub enhance_prompt: bool,
    pub answers: PromptAnswers,
    pub input_image: Option<InputImageMeta>,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Uuid,
        kind: GenerationKind,
        original_prompt: impl Into<String>,
        custom_prompt: Option<String>,
        enhance_prompt: bool,
        answers: PromptAnswers,
        input_image: Option<InputImageMeta>,
        image_urls: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            original_prompt: original_prompt.into(),
            custom_prompt,
            enhance_prompt,
            answers,
            input_image,
            image_urls,
            created_at: Utc::now(),
        }
    }
}
