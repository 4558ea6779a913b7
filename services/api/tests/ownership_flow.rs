//! Integration tests for ownership-guarded caption persistence
//!
//! These tests run against a live PostgreSQL instance referenced by
//! `DATABASE_URL` and are skipped when the variable is not set. Tables are
//! bootstrapped on first use and every test works with fresh users, so runs
//! are independent of each other.

use serial_test::serial;
use sqlx::PgPool;
use uuid::Uuid;

use api::{
    error::ApiError,
    guards::{resolve_accessible_template, resolve_owned_session},
    models::{
        caption::{CreateCaptionRequest, UpdateCaptionRequest},
        session::{CreateSessionRequest, UpdateSessionRequest},
        template::CreateTemplateRequest,
    },
    repositories::{CaptionRepository, SessionRepository, TemplateRepository},
};

async fn connect() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return None;
    };

    let pool = PgPool::connect(&url)
        .await
        .expect("failed to connect to the test database");
    ensure_schema(&pool).await;
    Some(pool)
}

async fn ensure_schema(pool: &PgPool) {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS caption_sessions (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            core_message TEXT,
            target_audience TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("failed to create caption_sessions table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS captions (
            id UUID PRIMARY KEY,
            session_id UUID NOT NULL REFERENCES caption_sessions(id),
            platform TEXT,
            tone TEXT,
            variant_label TEXT,
            caption_text TEXT NOT NULL,
            hashtags TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("failed to create captions table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS caption_templates (
            id UUID PRIMARY KEY,
            user_id UUID,
            name TEXT NOT NULL,
            platform TEXT,
            tone TEXT,
            body TEXT NOT NULL,
            is_system BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("failed to create caption_templates table");
}

fn new_session(name: &str) -> CreateSessionRequest {
    CreateSessionRequest {
        name: name.to_string(),
        description: None,
        core_message: None,
        target_audience: None,
    }
}

fn new_caption(text: &str) -> CreateCaptionRequest {
    CreateCaptionRequest {
        caption_text: text.to_string(),
        platform: None,
        tone: None,
        variant_label: None,
        hashtags: None,
        template_id: None,
    }
}

#[tokio::test]
#[serial]
async fn session_listing_is_scoped_to_owner() -> Result<(), Box<dyn std::error::Error>> {
    let Some(pool) = connect().await else {
        return Ok(());
    };
    let sessions = SessionRepository::new(pool);

    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();

    let created = sessions.create(user_a, &new_session("Launch promo")).await?;
    assert_eq!(created.user_id, user_a);
    assert_eq!(created.created_at, created.updated_at);

    let a_sessions = sessions.list_by_user(user_a).await?;
    assert!(a_sessions.iter().any(|s| s.id == created.id));

    let b_sessions = sessions.list_by_user(user_b).await?;
    assert!(b_sessions.iter().all(|s| s.id != created.id));

    Ok(())
}

#[tokio::test]
#[serial]
async fn partial_update_touches_only_supplied_fields() -> Result<(), Box<dyn std::error::Error>> {
    let Some(pool) = connect().await else {
        return Ok(());
    };
    let sessions = SessionRepository::new(pool);

    let user = Uuid::new_v4();
    let created = sessions
        .create(
            user,
            &CreateSessionRequest {
                name: "Spring drop".to_string(),
                description: Some("Teaser campaign".to_string()),
                core_message: None,
                target_audience: Some("sneakerheads".to_string()),
            },
        )
        .await?;

    let patch = UpdateSessionRequest {
        name: Some("Spring drop v2".to_string()),
        ..Default::default()
    };
    let updated = sessions
        .update(created.id, user, &patch)
        .await?
        .expect("session should still resolve for its owner");

    assert_eq!(updated.name, "Spring drop v2");
    assert_eq!(updated.description.as_deref(), Some("Teaser campaign"));
    assert_eq!(updated.target_audience.as_deref(), Some("sneakerheads"));
    assert!(updated.updated_at >= created.updated_at);

    Ok(())
}

#[tokio::test]
#[serial]
async fn foreign_session_resolves_as_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let Some(pool) = connect().await else {
        return Ok(());
    };
    let sessions = SessionRepository::new(pool);

    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let created = sessions.create(owner, &new_session("Private plans")).await?;

    let err = resolve_owned_session(&sessions, created.id, stranger)
        .await
        .expect_err("a stranger must not resolve another user's session");
    assert!(matches!(err, ApiError::NotFound(_)));

    let resolved = resolve_owned_session(&sessions, created.id, owner).await?;
    assert_eq!(resolved.id, created.id);

    Ok(())
}

#[tokio::test]
#[serial]
async fn caption_lifecycle_within_a_session() -> Result<(), Box<dyn std::error::Error>> {
    let Some(pool) = connect().await else {
        return Ok(());
    };
    let sessions = SessionRepository::new(pool.clone());
    let captions = CaptionRepository::new(pool);

    let user = Uuid::new_v4();
    let session = sessions.create(user, &new_session("Launch promo")).await?;

    let caption = captions
        .create(session.id, &new_caption("🚀 New drop!"))
        .await?;
    assert_eq!(caption.session_id, session.id);

    let listed = captions.list_by_session(session.id).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, caption.id);

    assert!(captions.delete(caption.id, session.id).await?);

    let listed = captions.list_by_session(session.id).await?;
    assert!(listed.is_empty());

    Ok(())
}

#[tokio::test]
#[serial]
async fn caption_addressing_is_scoped_to_session() -> Result<(), Box<dyn std::error::Error>> {
    let Some(pool) = connect().await else {
        return Ok(());
    };
    let sessions = SessionRepository::new(pool.clone());
    let captions = CaptionRepository::new(pool);

    let user = Uuid::new_v4();
    let first = sessions.create(user, &new_session("First")).await?;
    let second = sessions.create(user, &new_session("Second")).await?;

    let caption = captions.create(first.id, &new_caption("Original text")).await?;

    // Addressing the caption through an unrelated session matches nothing.
    let patch = UpdateCaptionRequest {
        caption_text: Some("Hijacked".to_string()),
        ..Default::default()
    };
    assert!(captions.update(caption.id, second.id, &patch).await?.is_none());
    assert!(!captions.delete(caption.id, second.id).await?);

    let listed = captions.list_by_session(first.id).await?;
    assert_eq!(listed[0].caption_text, "Original text");

    Ok(())
}

#[tokio::test]
#[serial]
async fn private_templates_are_forbidden_to_others() -> Result<(), Box<dyn std::error::Error>> {
    let Some(pool) = connect().await else {
        return Ok(());
    };
    let templates = TemplateRepository::new(pool);

    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let private = templates
        .create(
            owner,
            &CreateTemplateRequest {
                name: "CTA".to_string(),
                platform: Some("instagram".to_string()),
                tone: None,
                body: "Shop the drop at {link}".to_string(),
            },
        )
        .await?;

    let err = resolve_accessible_template(&templates, private.id, stranger)
        .await
        .expect_err("a private template must not be accessible to a stranger");
    assert!(matches!(err, ApiError::Forbidden(_)));

    let resolved = resolve_accessible_template(&templates, private.id, owner).await?;
    assert_eq!(resolved.id, private.id);

    let err = resolve_accessible_template(&templates, Uuid::new_v4(), owner)
        .await
        .expect_err("a missing template must not resolve");
    assert!(matches!(err, ApiError::NotFound(_)));

    Ok(())
}

#[tokio::test]
#[serial]
async fn global_templates_are_visible_to_everyone() -> Result<(), Box<dyn std::error::Error>> {
    let Some(pool) = connect().await else {
        return Ok(());
    };
    let templates = TemplateRepository::new(pool.clone());

    // Global templates only enter through privileged seeding, never a handler.
    let global_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO caption_templates (id, user_id, name, body, is_system)
        VALUES ($1, NULL, 'Seeded announcement', 'Big news: {headline}', TRUE)
        "#,
    )
    .bind(global_id)
    .execute(&pool)
    .await?;

    let anyone = Uuid::new_v4();
    let resolved = resolve_accessible_template(&templates, global_id, anyone).await?;
    assert!(resolved.user_id.is_none());

    let visible = templates.list_visible(anyone).await?;
    assert!(visible.iter().any(|t| t.id == global_id));

    Ok(())
}

#[tokio::test]
#[serial]
async fn created_templates_are_never_system() -> Result<(), Box<dyn std::error::Error>> {
    let Some(pool) = connect().await else {
        return Ok(());
    };
    let templates = TemplateRepository::new(pool);

    let user = Uuid::new_v4();
    let template = templates
        .create(
            user,
            &CreateTemplateRequest {
                name: "Giveaway".to_string(),
                platform: None,
                tone: Some("playful".to_string()),
                body: "Tag a friend to win!".to_string(),
            },
        )
        .await?;

    assert!(!template.is_system);
    assert_eq!(template.user_id, Some(user));

    let stranger = Uuid::new_v4();
    let visible_to_stranger = templates.list_visible(stranger).await?;
    assert!(visible_to_stranger.iter().all(|t| t.id != template.id));

    Ok(())
}
