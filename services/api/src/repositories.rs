//! Repositories for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::session::{CaptionSession, CreateSessionRequest, UpdateSessionRequest};

pub mod caption;
pub mod template;

pub use caption::CaptionRepository;
pub use template::TemplateRepository;

/// Caption session repository for database operations
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new caption session owned by the given user
    pub async fn create(
        &self,
        user_id: Uuid,
        payload: &CreateSessionRequest,
    ) -> DatabaseResult<CaptionSession> {
        info!("Creating caption session for user {}", user_id);

        sqlx::query_as::<_, CaptionSession>(
            r#"
            INSERT INTO caption_sessions (id, user_id, name, description, core_message, target_audience, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING id, user_id, name, description, core_message, target_audience, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&payload.name)
        .bind(payload.description.as_deref())
        .bind(payload.core_message.as_deref())
        .bind(payload.target_audience.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    /// Find a session matching both the id and the owner
    ///
    /// A session owned by someone else resolves to `None`, same as a
    /// nonexistent one.
    pub async fn find_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> DatabaseResult<Option<CaptionSession>> {
        sqlx::query_as::<_, CaptionSession>(
            r#"
            SELECT id, user_id, name, description, core_message, target_audience, created_at, updated_at
            FROM caption_sessions
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    /// Apply a partial update to an owned session, refreshing `updated_at`
    ///
    /// Absent patch fields keep their current values.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: &UpdateSessionRequest,
    ) -> DatabaseResult<Option<CaptionSession>> {
        sqlx::query_as::<_, CaptionSession>(
            r#"
            UPDATE caption_sessions
            SET name = COALESCE($3, name),
                description = COALESCE($4, description),
                core_message = COALESCE($5, core_message),
                target_audience = COALESCE($6, target_audience),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, description, core_message, target_audience, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(patch.name.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.core_message.as_deref())
        .bind(patch.target_audience.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    /// List all sessions owned by the given user
    pub async fn list_by_user(&self, user_id: Uuid) -> DatabaseResult<Vec<CaptionSession>> {
        sqlx::query_as::<_, CaptionSession>(
            r#"
            SELECT id, user_id, name, description, core_message, target_audience, created_at, updated_at
            FROM caption_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}
