// SPDX-License-Identifier: MIT

//! Typed store operations for users and stories.
//!
//! Production runs against Firestore; tests run against an in-memory
//! backend with the same interface. Story documents are written by the
//! synthesis function; this service updates and reads them.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Story, User};
use dashmap::DashMap;
use std::sync::Arc;

/// Database client with a pluggable backend.
#[derive(Clone)]
pub struct Database {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(MemoryStore),
}

/// In-memory backend used by tests and offline development.
#[derive(Clone, Default)]
struct MemoryStore {
    users: Arc<DashMap<String, User>>,
    stories: Arc<DashMap<String, Story>>,
}

impl Database {
    /// Connect to Firestore.
    ///
    /// For local development with the emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn connect(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Connect to the Firestore emulator with unauthenticated access.
    async fn connect_emulator(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a database backed by process memory.
    ///
    /// Clones share the underlying maps.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryStore::default()),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(store) => Ok(store.users.get(id).map(|u| u.clone())),
        }
    }

    /// Find a user by email (unique).
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let email = email.to_string();
                let users: Vec<User> = client
                    .fluent()
                    .select()
                    .from(collections::USERS)
                    .filter(move |q| q.field("email").eq(email.clone()))
                    .limit(1)
                    .obj()
                    .query()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(users.into_iter().next())
            }
            Backend::Memory(store) => Ok(store
                .users
                .iter()
                .find(|entry| entry.value().email == email)
                .map(|entry| entry.value().clone())),
        }
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                client
                    .fluent()
                    .update()
                    .in_col(collections::USERS)
                    .document_id(&user.id)
                    .object(user)
                    .execute::<()>()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(store) => {
                store.users.insert(user.id.clone(), user.clone());
                Ok(())
            }
        }
    }

    // ─── Story Operations ────────────────────────────────────────

    /// Get a story by ID.
    pub async fn get_story(&self, id: &str) -> Result<Option<Story>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::STORIES)
                .obj()
                .one(id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(store) => Ok(store.stories.get(id).map(|s| s.clone())),
        }
    }

    /// List all stories, newest first.
    pub async fn list_stories(&self) -> Result<Vec<Story>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .from(collections::STORIES)
                .order_by([(
                    "created_at",
                    firestore::FirestoreQueryDirection::Descending,
                )])
                .obj()
                .query()
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(store) => {
                let mut stories: Vec<Story> = store
                    .stories
                    .iter()
                    .map(|entry| entry.value().clone())
                    .collect();
                stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(stories)
            }
        }
    }

    /// Create or update a story record.
    ///
    /// In production the synthesis function writes story documents; this
    /// exists for the in-memory backend and data tooling.
    pub async fn upsert_story(&self, story: &Story) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                client
                    .fluent()
                    .update()
                    .in_col(collections::STORIES)
                    .document_id(&story.id)
                    .object(story)
                    .execute::<()>()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(store) => {
                store.stories.insert(story.id.clone(), story.clone());
                Ok(())
            }
        }
    }

    /// Write cover image and category onto an existing story.
    ///
    /// Returns `false` when no record matched the ID, so the caller can
    /// detect a consistency gap with the synthesis function.
    pub async fn update_story_metadata(
        &self,
        id: &str,
        cover_image: &str,
        category: Option<&str>,
    ) -> Result<bool, AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                // Read-modify-write; Firestore upserts by default, and a
                // blind update would mask a missing document.
                let Some(mut story) = self.get_story(id).await? else {
                    return Ok(false);
                };
                story.cover_image = Some(cover_image.to_string());
                story.category = category.map(str::to_string);

                client
                    .fluent()
                    .update()
                    .in_col(collections::STORIES)
                    .document_id(id)
                    .object(&story)
                    .execute::<()>()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(true)
            }
            Backend::Memory(store) => match store.stories.get_mut(id) {
                Some(mut entry) => {
                    entry.cover_image = Some(cover_image.to_string());
                    entry.category = category.map(str::to_string);
                    Ok(true)
                }
                None => Ok(false),
            },
        }
    }
}
