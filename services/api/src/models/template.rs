//! Caption template entity and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Caption template entity
///
/// Reusable caption body, either private to its creator (`user_id` set) or
/// global to all users (`user_id` absent).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaptionTemplate {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub platform: Option<String>,
    pub tone: Option<String>,
    pub body: String,
    /// Set only by privileged seeding; no handler exposes it
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
}

/// New template payload
///
/// `is_system` is deliberately not part of the payload: created templates are
/// always attributed to the acting user with `is_system = false`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub platform: Option<String>,
    pub tone: Option<String>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_system_in_input_is_ignored() {
        // Unknown fields are dropped at the deserialization boundary, so a
        // client supplying is_system cannot influence the stored row.
        let payload: CreateTemplateRequest = serde_json::from_str(
            r#"{"name": "CTA", "body": "Shop the drop", "is_system": true}"#,
        )
        .unwrap();
        assert_eq!(payload.name, "CTA");
        assert_eq!(payload.body, "Shop the drop");
    }
}
