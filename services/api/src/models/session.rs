//! Caption session entity and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Caption session entity
///
/// One campaign/post concept owned by a single user, grouping caption
/// variants.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaptionSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub core_message: Option<String>,
    pub target_audience: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New caption session payload
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    pub description: Option<String>,
    pub core_message: Option<String>,
    pub target_audience: Option<String>,
}

/// Caption session update payload
///
/// Partial update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSessionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub core_message: Option<String>,
    pub target_audience: Option<String>,
}

impl UpdateSessionRequest {
    /// True when the patch carries no updatable field
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.core_message.is_none()
            && self.target_audience.is_none()
    }
}
