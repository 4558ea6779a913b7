//! Caption template repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::template::{CaptionTemplate, CreateTemplateRequest};

/// Caption template repository for database operations
#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    /// Create a new template repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new template attributed to the acting user
    ///
    /// `is_system` is always persisted as false; system templates only enter
    /// through privileged seeding.
    pub async fn create(
        &self,
        user_id: Uuid,
        payload: &CreateTemplateRequest,
    ) -> DatabaseResult<CaptionTemplate> {
        info!("Creating caption template for user {}", user_id);

        sqlx::query_as::<_, CaptionTemplate>(
            r#"
            INSERT INTO caption_templates (id, user_id, name, platform, tone, body, is_system, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, NOW())
            RETURNING id, user_id, name, platform, tone, body, is_system, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&payload.name)
        .bind(payload.platform.as_deref())
        .bind(payload.tone.as_deref())
        .bind(&payload.body)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    /// Find a template by id alone, regardless of owner
    pub async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<CaptionTemplate>> {
        sqlx::query_as::<_, CaptionTemplate>(
            r#"
            SELECT id, user_id, name, platform, tone, body, is_system, created_at
            FROM caption_templates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    /// List templates visible to the given user: their own plus global ones
    pub async fn list_visible(&self, user_id: Uuid) -> DatabaseResult<Vec<CaptionTemplate>> {
        sqlx::query_as::<_, CaptionTemplate>(
            r#"
            SELECT id, user_id, name, platform, tone, body, is_system, created_at
            FROM caption_templates
            WHERE user_id = $1 OR user_id IS NULL
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}
