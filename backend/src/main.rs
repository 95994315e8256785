//! Smart Agro Assistant - Backend Server
//!
//! Serves rainfall forecasts, crop recommendations and advisory text from
//! frozen models bound once at startup.

use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use shared::EvaluationReport;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod data;
mod error;
mod handlers;
mod routes;
mod services;

pub use config::Config;
use services::PredictionService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub prediction: PredictionService,
    pub evaluation: Option<Arc<EvaluationReport>>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agro_server=debug,shared=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Smart Agro Assistant Server");
    tracing::info!("Environment: {}", config.environment);

    // Bind models
    tracing::info!("Loading models...");
    let prediction =
        PredictionService::from_config(&config.models).context("failed to bind models")?;

    // Evaluate against configured datasets
    let evaluation = services::evaluation::build_report(&prediction, &config.datasets)
        .context("failed to evaluate models")?
        .map(Arc::new);
    if let Some(report) = &evaluation {
        tracing::debug!("Evaluation summary:\n{}", report.summary_text());
    }

    // Create application state
    let state = AppState {
        prediction,
        evaluation,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Smart Agro Assistant API v1.0"
}
