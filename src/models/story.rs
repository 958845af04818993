//! Story model for storage and API.

use serde::{Deserialize, Serialize};

/// A narrated story.
///
/// The document is created by the synthesis function, which also mints the
/// ID. This service only fills in `cover_image` and `category` afterwards
/// and reads the rest back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// ID minted by the synthesis function (also the document ID)
    pub id: String,
    /// Opaque reference text
    #[serde(default)]
    pub code: Option<String>,
    pub title: String,
    /// Text as submitted by the client
    pub original_text: String,
    /// Rendered HTML, written by the synthesis function
    #[serde(default)]
    pub display_html: Option<String>,
    /// Timing/markup data, written by the synthesis function
    #[serde(default)]
    pub speechmark: Option<serde_json::Value>,
    /// Audio artifact URL, written by the synthesis function
    #[serde(default)]
    pub audio_file: Option<String>,
    pub language: String,
    /// Synthesis settings blob
    #[serde(default)]
    pub config: Option<serde_json::Value>,
    /// When the story was created (RFC 3339)
    pub created_at: String,
    /// Client-supplied or randomly chosen from the catalog
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}
