//! Caption repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::caption::{Caption, CreateCaptionRequest, UpdateCaptionRequest};

/// Caption repository for database operations
///
/// Every query is scoped to a session id; callers authorize the session
/// before touching captions.
#[derive(Clone)]
pub struct CaptionRepository {
    pool: PgPool,
}

impl CaptionRepository {
    /// Create a new caption repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new caption under the given session
    pub async fn create(
        &self,
        session_id: Uuid,
        payload: &CreateCaptionRequest,
    ) -> DatabaseResult<Caption> {
        info!("Creating caption in session {}", session_id);

        sqlx::query_as::<_, Caption>(
            r#"
            INSERT INTO captions (id, session_id, platform, tone, variant_label, caption_text, hashtags, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING id, session_id, platform, tone, variant_label, caption_text, hashtags, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session_id)
        .bind(payload.platform.as_deref())
        .bind(payload.tone.as_deref())
        .bind(payload.variant_label.as_deref())
        .bind(&payload.caption_text)
        .bind(payload.hashtags.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    /// Apply a partial update to a caption addressed by (id, session_id)
    ///
    /// A caption id that exists under a different session matches nothing and
    /// resolves to `None`.
    pub async fn update(
        &self,
        id: Uuid,
        session_id: Uuid,
        patch: &UpdateCaptionRequest,
    ) -> DatabaseResult<Option<Caption>> {
        sqlx::query_as::<_, Caption>(
            r#"
            UPDATE captions
            SET platform = COALESCE($3, platform),
                tone = COALESCE($4, tone),
                variant_label = COALESCE($5, variant_label),
                caption_text = COALESCE($6, caption_text),
                hashtags = COALESCE($7, hashtags)
            WHERE id = $1 AND session_id = $2
            RETURNING id, session_id, platform, tone, variant_label, caption_text, hashtags, created_at
            "#,
        )
        .bind(id)
        .bind(session_id)
        .bind(patch.platform.as_deref())
        .bind(patch.tone.as_deref())
        .bind(patch.variant_label.as_deref())
        .bind(patch.caption_text.as_deref())
        .bind(patch.hashtags.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    /// Delete a caption addressed by (id, session_id)
    ///
    /// Returns false when no row matched.
    pub async fn delete(&self, id: Uuid, session_id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM captions
            WHERE id = $1 AND session_id = $2
            "#,
        )
        .bind(id)
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    /// List all captions belonging to the given session
    pub async fn list_by_session(&self, session_id: Uuid) -> DatabaseResult<Vec<Caption>> {
        sqlx::query_as::<_, Caption>(
            r#"
            SELECT id, session_id, platform, tone, variant_label, caption_text, hashtags, created_at
            FROM captions
            WHERE session_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}
