// SPDX-License-Identifier: MIT

//! Storyvoice API Server
//!
//! Google OAuth login with cookie sessions, and a story resource whose
//! creation is delegated to an external text-to-speech synthesis function.

use std::sync::Arc;
use storyvoice::{
    config::Config,
    db::Database,
    services::{CoverCatalog, GoogleAuthService, StoryService, SynthesisClient},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Storyvoice API");

    // Initialize Firestore database
    let db = Database::connect(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Load the cover-image catalog; a broken catalog degrades story covers
    // but should not keep the service down.
    let covers = match CoverCatalog::load_from_file(&config.cover_images_path) {
        Ok(covers) => {
            tracing::info!(count = covers.len(), "Cover image catalog loaded");
            covers
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %config.cover_images_path,
                "Failed to load cover catalog, continuing with an empty one"
            );
            CoverCatalog::default()
        }
    };

    // Initialize outbound clients and services
    let synthesis = SynthesisClient::new(config.synthesis_url.clone());
    let google = GoogleAuthService::new(&config, db.clone());
    let story_service = StoryService::new(db.clone(), synthesis, covers);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        google,
        story_service,
    });

    // Build router
    let app = storyvoice::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("storyvoice=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
