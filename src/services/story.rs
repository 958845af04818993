// SPDX-License-Identifier: MIT

//! Story creation and queries.
//!
//! Creation is a linear pipeline: validate, dispatch to the synthesis
//! function, reconcile the minted ID, write cover/category metadata, and
//! re-read the complete record. Any failure aborts the whole workflow; no
//! step is retried and nothing is rolled back, so the store may keep a
//! story the synthesis function created even when a later step failed.

use crate::db::Database;
use crate::error::AppError;
use crate::models::Story;
use crate::services::covers::CoverCatalog;
use crate::services::synthesis::{SynthesisClient, SynthesisRequest};
use serde::Serialize;

/// Story-creation input, already decoupled from the HTTP request shape.
#[derive(Debug, Clone, Default)]
pub struct CreateStoryInput {
    pub title: String,
    pub text: String,
    pub rate: Option<String>,
    pub language: Option<String>,
    pub cover_image: Option<String>,
    pub category: Option<String>,
}

/// Successful creation result.
#[derive(Debug, Serialize)]
pub struct CreateStoryResult {
    pub message: String,
    /// Raw payload returned by the synthesis function
    pub synthesis: serde_json::Value,
    pub story: Story,
}

/// Story orchestration over the store and the synthesis function.
#[derive(Clone)]
pub struct StoryService {
    db: Database,
    synthesis: SynthesisClient,
    covers: CoverCatalog,
}

impl StoryService {
    pub fn new(db: Database, synthesis: SynthesisClient, covers: CoverCatalog) -> Self {
        Self {
            db,
            synthesis,
            covers,
        }
    }

    /// Validate creation input, returning the language setting.
    ///
    /// Runs before any outbound call; failures here are client errors and
    /// are never logged as pipeline failures.
    fn validate(input: &CreateStoryInput) -> Result<String, AppError> {
        if input.title.trim().is_empty() {
            return Err(AppError::BadRequest("Story title is required".to_string()));
        }

        if input.text.trim().is_empty() {
            return Err(AppError::BadRequest("Story text is required".to_string()));
        }

        match input.language.as_deref().map(str::trim) {
            Some(language) if !language.is_empty() => Ok(language.to_string()),
            _ => Err(AppError::BadRequest(
                "Language setting is required".to_string(),
            )),
        }
    }

    /// Run the full creation pipeline.
    pub async fn create_story(
        &self,
        input: CreateStoryInput,
    ) -> Result<CreateStoryResult, AppError> {
        // Step 1: validate before touching the synthesis function
        let language = Self::validate(&input)?;

        // Step 2: dispatch synthesis
        let request = SynthesisRequest::new(
            input.title.clone(),
            input.text.clone(),
            input.rate.clone(),
            language,
        );
        let outcome = self.synthesis.synthesize(&request).await.map_err(|e| {
            tracing::error!(error = %e, title = %input.title, "Synthesis dispatch failed");
            e
        })?;

        // Step 3: the minted ID has already been validated at the boundary
        let story_id = outcome.story_id.clone();

        // Step 4: write cover image and category onto the minted record
        let cover_image = input
            .cover_image
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.covers.random_url());

        let updated = self
            .db
            .update_story_metadata(&story_id, &cover_image, input.category.as_deref())
            .await?;

        if !updated {
            tracing::error!(
                story_id = %story_id,
                "Synthesis function reported a story but no matching record exists"
            );
            return Err(AppError::Inconsistency(format!(
                "story {} was reported by the synthesis function but is not in the store",
                story_id
            )));
        }

        // Step 5: re-read the complete record for the response
        let story = self.db.get_story(&story_id).await?.ok_or_else(|| {
            tracing::error!(story_id = %story_id, "Story missing after metadata update");
            AppError::Inconsistency(format!(
                "story {} was created but could not be retrieved",
                story_id
            ))
        })?;

        tracing::info!(story_id = %story.id, title = %story.title, "Story created");

        Ok(CreateStoryResult {
            message: "Story created successfully".to_string(),
            synthesis: outcome.payload,
            story,
        })
    }

    /// All stories, newest first.
    pub async fn find_all(&self) -> Result<Vec<Story>, AppError> {
        self.db.list_stories().await
    }

    /// One story by ID.
    pub async fn find_one(&self, id: &str) -> Result<Story, AppError> {
        self.db
            .get_story(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Story with ID {} not found", id)))
    }
}
