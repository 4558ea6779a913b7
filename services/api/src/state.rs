//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    middleware::JwtConfig,
    repositories::{CaptionRepository, SessionRepository, TemplateRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_config: JwtConfig,
    pub session_repository: SessionRepository,
    pub caption_repository: CaptionRepository,
    pub template_repository: TemplateRepository,
}
