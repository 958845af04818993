// SPDX-License-Identifier: MIT

//! Storyvoice: backend API for narrated stories.
//!
//! This crate provides Google OAuth login with cookie sessions and a story
//! resource whose creation delegates text-to-speech synthesis to an
//! external serverless function.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use services::{GoogleAuthService, StoryService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub google: GoogleAuthService,
    pub story_service: StoryService,
}
