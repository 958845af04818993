// SPDX-License-Identifier: MIT

//! Story routes.
//!
//! Reads are public; creation requires a valid session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::Story;
use crate::services::story::{CreateStoryInput, CreateStoryResult};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/story", get(get_all_stories))
        .route("/story/{id}", get(get_one_story))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/story", post(create_story))
}

/// Story creation request body.
///
/// `title` and `text` default to empty so that absent fields fall through
/// to the orchestrator's validation instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CreateStoryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub settings: Option<StorySettings>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StorySettings {
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// List all stories, newest first.
async fn get_all_stories(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Story>>> {
    let stories = state.story_service.find_all().await?;
    Ok(Json(stories))
}

/// Fetch one story by ID.
async fn get_one_story(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Story>> {
    let story = state.story_service.find_one(&id).await?;
    Ok(Json(story))
}

/// Create a new story via the synthesis function.
async fn create_story(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateStoryRequest>,
) -> Result<(StatusCode, Json<CreateStoryResult>)> {
    let (rate, language) = match body.settings {
        Some(settings) => (settings.rate, settings.language),
        None => (None, None),
    };

    let input = CreateStoryInput {
        title: body.title,
        text: body.text,
        rate,
        language,
        cover_image: body.cover_image,
        category: body.category,
    };

    let result = state.story_service.create_story(input).await?;
    Ok((StatusCode::CREATED, Json(result)))
}
