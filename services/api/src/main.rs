use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database::{DatabaseConfig, init_pool};
use tokio::net::TcpListener;

use api::{
    middleware::JwtConfig,
    repositories::{CaptionRepository, SessionRepository, TemplateRepository},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting caption API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Load the identity provider's verification key
    let jwt_config = JwtConfig::from_env()?;

    info!("Caption API service initialized successfully");

    // Initialize repositories
    let session_repository = SessionRepository::new(pool.clone());
    let caption_repository = CaptionRepository::new(pool.clone());
    let template_repository = TemplateRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        jwt_config,
        session_repository,
        caption_repository,
        template_repository,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Caption API service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
