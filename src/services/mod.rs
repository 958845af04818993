// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod covers;
pub mod google;
pub mod story;
pub mod synthesis;

pub use covers::CoverCatalog;
pub use google::{GoogleAuthService, GoogleProfile};
pub use story::{CreateStoryInput, StoryService};
pub use synthesis::SynthesisClient;
