//! API service routes
//!
//! One handler per operation, each following the same shape: validate input,
//! resolve the acting identity, authorize the target rows, perform one store
//! operation, return the `{success, data}` envelope.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    guards::{resolve_accessible_template, resolve_owned_session},
    middleware::{AuthUser, auth_middleware},
    models::{
        ApiResponse, ListPayload,
        caption::{CreateCaptionRequest, UpdateCaptionRequest},
        session::{CreateSessionRequest, UpdateSessionRequest},
        template::CreateTemplateRequest,
    },
    state::AppState,
    validation::{validate_caption_text, validate_session_name, validate_template_body},
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/sessions",
            post(create_caption_session).get(list_caption_sessions),
        )
        .route("/sessions/:id", patch(update_caption_session))
        .route(
            "/sessions/:session_id/captions",
            post(create_caption).get(list_captions),
        )
        .route(
            "/sessions/:session_id/captions/:id",
            patch(update_caption).delete(delete_caption),
        )
        .route("/templates", post(create_template).get(list_templates))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    if !common::database::health_check(&state.db_pool).await? {
        return Err(ApiError::Internal);
    }

    Ok(Json(json!({
        "status": "ok",
        "service": "caption-api"
    })))
}

/// Create a new caption session
pub async fn create_caption_session(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSessionRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_session_name(&payload.name).map_err(ApiError::InvalidInput)?;

    let session = state.session_repository.create(user.id, &payload).await?;

    info!("Created caption session {} for user {}", session.id, user.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::new(session))))
}

/// Partially update an owned caption session
pub async fn update_caption_session(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSessionRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.is_empty() {
        return Err(ApiError::InvalidInput(
            "At least one updatable field is required".to_string(),
        ));
    }
    if let Some(name) = &payload.name {
        validate_session_name(name).map_err(ApiError::InvalidInput)?;
    }

    resolve_owned_session(&state.session_repository, id, user.id).await?;

    let session = state
        .session_repository
        .update(id, user.id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Caption session not found".to_string()))?;

    Ok(Json(ApiResponse::new(session)))
}

/// List all caption sessions owned by the acting user
pub async fn list_caption_sessions(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let items = state.session_repository.list_by_user(user.id).await?;

    Ok(Json(ApiResponse::new(ListPayload::new(items))))
}

/// Create a new caption under an owned session
pub async fn create_caption(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<CreateCaptionRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_caption_text(&payload.caption_text).map_err(ApiError::InvalidInput)?;

    resolve_owned_session(&state.session_repository, session_id, user.id).await?;

    // The template is an existence/access gate only; its body is not merged
    // into the caption text.
    if let Some(template_id) = payload.template_id {
        resolve_accessible_template(&state.template_repository, template_id, user.id).await?;
    }

    let caption = state.caption_repository.create(session_id, &payload).await?;

    info!("Created caption {} in session {}", caption.id, session_id);

    Ok((StatusCode::CREATED, Json(ApiResponse::new(caption))))
}

/// Partially update a caption within an owned session
pub async fn update_caption(
    State(state): State<AppState>,
    user: AuthUser,
    Path((session_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateCaptionRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.is_empty() {
        return Err(ApiError::InvalidInput(
            "At least one updatable field is required".to_string(),
        ));
    }
    if let Some(text) = &payload.caption_text {
        validate_caption_text(text).map_err(ApiError::InvalidInput)?;
    }

    resolve_owned_session(&state.session_repository, session_id, user.id).await?;

    let caption = state
        .caption_repository
        .update(id, session_id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Caption not found".to_string()))?;

    Ok(Json(ApiResponse::new(caption)))
}

/// Delete a caption within an owned session
pub async fn delete_caption(
    State(state): State<AppState>,
    user: AuthUser,
    Path((session_id, id)): Path<(Uuid, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    resolve_owned_session(&state.session_repository, session_id, user.id).await?;

    let deleted = state.caption_repository.delete(id, session_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Caption not found".to_string()));
    }

    info!("Deleted caption {} from session {}", id, session_id);

    Ok(Json(json!({"success": true})))
}

/// List all captions belonging to an owned session
pub async fn list_captions(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    resolve_owned_session(&state.session_repository, session_id, user.id).await?;

    let items = state.caption_repository.list_by_session(session_id).await?;

    Ok(Json(ApiResponse::new(ListPayload::new(items))))
}

/// Create a new caption template attributed to the acting user
pub async fn create_template(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTemplateRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_template_body(&payload.body).map_err(ApiError::InvalidInput)?;

    let template = state.template_repository.create(user.id, &payload).await?;

    info!("Created caption template {} for user {}", template.id, user.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::new(template))))
}

/// List templates visible to the acting user: their own plus global ones
pub async fn list_templates(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let items = state.template_repository.list_visible(user.id).await?;

    Ok(Json(ApiResponse::new(ListPayload::new(items))))
}
