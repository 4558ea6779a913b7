//! Access guards resolving target rows against the acting identity
//!
//! Both guards run one fresh lookup per call; nothing is cached across
//! requests.

use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{session::CaptionSession, template::CaptionTemplate},
    repositories::{SessionRepository, TemplateRepository},
};

/// Resolve a session by id and owner
///
/// A session owned by a different user is reported as not found, so the
/// existence of another user's data is never revealed.
pub async fn resolve_owned_session(
    sessions: &SessionRepository,
    session_id: Uuid,
    user_id: Uuid,
) -> Result<CaptionSession, ApiError> {
    sessions
        .find_owned(session_id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Caption session not found".to_string()))
}

/// Resolve a template by id, then check access
///
/// Unlike sessions, a private template of another user is reported as
/// Forbidden: existence is revealed, access is not.
pub async fn resolve_accessible_template(
    templates: &TemplateRepository,
    template_id: Uuid,
    user_id: Uuid,
) -> Result<CaptionTemplate, ApiError> {
    let template = templates
        .find_by_id(template_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

    if !is_template_accessible(template.user_id, user_id) {
        return Err(ApiError::Forbidden(
            "Template belongs to another user".to_string(),
        ));
    }

    Ok(template)
}

/// A template is accessible when it is global or owned by the acting user
fn is_template_accessible(owner: Option<Uuid>, user_id: Uuid) -> bool {
    owner.map_or(true, |owner| owner == user_id)
}
