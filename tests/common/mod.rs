// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use storyvoice::config::Config;
use storyvoice::db::Database;
use storyvoice::middleware::auth::create_jwt;
use storyvoice::models::{Story, User};
use storyvoice::routes::create_router;
use storyvoice::services::covers::CoverImage;
use storyvoice::services::{CoverCatalog, GoogleAuthService, StoryService, SynthesisClient};
use storyvoice::AppState;

/// Build a test app over the given database, synthesis endpoint, and
/// cover catalog. Returns the router and the shared state.
#[allow(dead_code)]
pub fn build_app(
    db: Database,
    synthesis_url: &str,
    covers: CoverCatalog,
) -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let synthesis = SynthesisClient::new(synthesis_url.to_string());
    let google = GoogleAuthService::new(&config, db.clone());
    let story_service = StoryService::new(db.clone(), synthesis, covers);

    let state = Arc::new(AppState {
        config,
        db,
        google,
        story_service,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an in-memory database and an unreachable
/// synthesis endpoint (tests that must not call it anyway).
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    build_app(
        Database::in_memory(),
        "http://127.0.0.1:9/synthesize",
        CoverCatalog::default(),
    )
}

/// A single-image catalog with a known URL.
#[allow(dead_code)]
pub fn single_cover_catalog(url: &str) -> CoverCatalog {
    CoverCatalog::from_images(vec![CoverImage {
        id: "only".to_string(),
        url: url.to_string(),
    }])
}

/// Insert a user the session middleware can look up.
#[allow(dead_code)]
pub async fn seed_user(db: &Database) -> User {
    let user = User {
        id: "user-1".to_string(),
        email: "asha@example.com".to_string(),
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        profile_picture: None,
        google_id: Some("google-sub-1".to_string()),
        created_at: "2026-01-01T00:00:00+00:00".to_string(),
        updated_at: "2026-01-01T00:00:00+00:00".to_string(),
    };
    db.upsert_user(&user).await.expect("seed user");
    user
}

/// Create a session token signed with the app's test key.
#[allow(dead_code)]
pub fn session_token(user: &User, state: &AppState) -> String {
    create_jwt(user, &state.config.jwt_signing_key).expect("create jwt")
}

/// A bare story record with the given ID and creation time.
#[allow(dead_code)]
pub fn test_story(id: &str, created_at: &str) -> Story {
    Story {
        id: id.to_string(),
        code: None,
        title: format!("Story {}", id),
        original_text: "Once upon a time".to_string(),
        display_html: None,
        speechmark: None,
        audio_file: None,
        language: "en".to_string(),
        config: None,
        created_at: created_at.to_string(),
        cover_image: None,
        category: None,
    }
}

#[derive(Clone)]
struct StubState {
    db: Database,
    calls: Arc<AtomicUsize>,
    story_id: &'static str,
}

/// Stub synthesis function handler: counts calls, writes the story
/// document the way the real function does, and returns the minted ID.
async fn stub_synthesize(
    State(stub): State<StubState>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    stub.calls.fetch_add(1, Ordering::SeqCst);

    let story = Story {
        id: stub.story_id.to_string(),
        code: None,
        title: body["title"].as_str().unwrap_or_default().to_string(),
        original_text: body["text"].as_str().unwrap_or_default().to_string(),
        display_html: Some("<p>synthesized</p>".to_string()),
        speechmark: None,
        audio_file: Some(format!(
            "https://cdn.example.com/audio/{}.mp3",
            stub.story_id
        )),
        language: body["settings"]["language"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        config: Some(body["settings"].clone()),
        created_at: chrono::Utc::now().to_rfc3339(),
        cover_image: None,
        category: None,
    };
    stub.db.upsert_story(&story).await.expect("stub story write");

    Json(json!({ "storyId": stub.story_id, "audioFile": story.audio_file }))
}

/// Spawn a stub synthesis server sharing the app's database.
///
/// Returns the endpoint URL and a counter of received calls.
#[allow(dead_code)]
pub async fn spawn_synthesis_stub(
    db: Database,
    story_id: &'static str,
) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let stub = StubState {
        db,
        calls: calls.clone(),
        story_id,
    };

    let app = Router::new()
        .route("/synthesize", post(stub_synthesize))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    (format!("http://{}/synthesize", addr), calls)
}

/// Spawn a stub synthesis server that always answers HTTP 500 with a
/// JSON `{message}` body.
#[allow(dead_code)]
pub async fn spawn_failing_synthesis_stub(message: &'static str) -> String {
    let app = Router::new().route(
        "/synthesize",
        post(move || async move {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": message })),
            )
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    format!("http://{}/synthesize", addr)
}
