//! GymHero Backend
//!
//! A workout and recovery tracking API.

use anyhow::Result;
use gymhero_backend::auth::PasswordService;
use gymhero_backend::models::{CreateUser, User};
use gymhero_backend::repository::{Repository, RepositoryError};
use gymhero_backend::{allow_list, config, db, routes, state::AppState};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() {
            "production"
        } else {
            "development"
        },
        "Starting GymHero Backend"
    );

    // Validate production configuration
    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    // Create database pool
    info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database.url, config.database.max_connections).await?;

    // Run migrations (skip in production if using separate migration job)
    if !config::AppConfig::is_production() {
        info!("Running database migrations...");
        db::run_migrations(&db_pool).await?;
    }

    // Load the relax type allow-list; a missing file is a startup error.
    let allow_list = Arc::new(allow_list::AllowList::load(&config.allow_list.path)?);
    if config.allow_list.refresh_secs > 0 {
        // Detached for the lifetime of the process.
        let _refresh =
            allow_list::spawn_refresh(allow_list.clone(), config.allow_list.refresh_secs);
    }

    // Ensure the bootstrap admin account exists
    bootstrap_admin(&db_pool, &config.admin).await?;

    // Create application state
    let state = AppState::new(db_pool, config.clone(), allow_list);

    // Build application
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the configured admin account if it does not exist yet. A unique
/// conflict means a previous boot already created it.
async fn bootstrap_admin(pool: &PgPool, admin: &config::AdminConfig) -> Result<()> {
    let password_hash = PasswordService::hash_async(admin.password.clone()).await?;
    let payload = CreateUser {
        email: admin.email.clone(),
        password_hash,
        full_name: Some("Administrator".to_string()),
        is_admin: true,
    };

    match Repository::<User>::create(pool, &payload).await {
        Ok(user) => {
            info!(id = user.id, email = %user.email, "Bootstrap admin created");
            Ok(())
        }
        Err(RepositoryError::Conflict(_)) => {
            info!(email = %admin.email, "Bootstrap admin already present");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "gymhero_backend=info,tower_http=info".into()
        } else {
            "gymhero_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.jwt.secret.contains("development") || config.jwt.secret.len() < 32 {
        errors.push("JWT secret must be at least 32 characters and not contain 'development'");
    }

    if config.admin.password == config::AdminConfig::default().password {
        errors.push("Bootstrap admin password must be changed from the default");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
