//! Caption entity and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Caption entity
///
/// One generated text variant belonging to exactly one session. Ownership is
/// transitive through the session and never stored on the caption itself.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Caption {
    pub id: Uuid,
    pub session_id: Uuid,
    pub platform: Option<String>,
    pub tone: Option<String>,
    pub variant_label: Option<String>,
    pub caption_text: String,
    /// Hashtag list as the caller encoded it (may be JSON); stored opaquely
    pub hashtags: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// New caption payload; the target session comes from the request path
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCaptionRequest {
    pub caption_text: String,
    pub platform: Option<String>,
    pub tone: Option<String>,
    pub variant_label: Option<String>,
    pub hashtags: Option<String>,
    /// Optional template gate; the template body is not merged into the text
    pub template_id: Option<Uuid>,
}

/// Caption update payload
///
/// Partial update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCaptionRequest {
    pub platform: Option<String>,
    pub tone: Option<String>,
    pub variant_label: Option<String>,
    pub caption_text: Option<String>,
    pub hashtags: Option<String>,
}

impl UpdateCaptionRequest {
    /// True when the patch carries no updatable field
    pub fn is_empty(&self) -> bool {
        self.platform.is_none()
            && self.tone.is_none()
            && self.variant_label.is_none()
            && self.caption_text.is_none()
            && self.hashtags.is_none()
    }
}
