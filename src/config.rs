//! Application configuration loaded from environment variables.
//!
//! Secrets are read once at startup and cached in memory; in production
//! they are injected as environment variables by the deployment platform.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// OAuth callback URL registered with Google
    pub google_callback_url: String,
    /// Hosted domain declared in the Google console; not enforced on login
    pub allowed_domain: Option<String>,
    /// Frontend URL for post-login redirects
    pub frontend_url: String,
    /// Endpoint of the synthesis function that mints stories
    pub synthesis_url: String,
    /// Origins allowed by CORS (beyond localhost)
    pub cors_allowed_origins: Vec<String>,
    /// GCP project ID (Firestore connection)
    pub gcp_project_id: String,
    /// Path to the cover-image catalog JSON file
    pub cover_images_path: String,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// HMAC key for signing the OAuth state parameter
    pub oauth_state_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .into_bytes();

        Ok(Self {
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            google_callback_url: env::var("GOOGLE_CALLBACK_URL")
                .map_err(|_| ConfigError::Missing("GOOGLE_CALLBACK_URL"))?,
            allowed_domain: env::var("ALLOWED_DOMAIN").ok(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            synthesis_url: env::var("SYNTHESIS_URL")
                .map_err(|_| ConfigError::Missing("SYNTHESIS_URL"))?,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            cover_images_path: env::var("COVER_IMAGES_PATH")
                .unwrap_or_else(|_| "data/cover-images.json".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            oauth_state_key: env::var("OAUTH_STATE_KEY")
                .map(String::into_bytes)
                .unwrap_or_else(|_| jwt_signing_key.clone()),
            jwt_signing_key,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            google_client_id: "test_client_id".to_string(),
            google_callback_url: "http://localhost:8080/auth/google/callback".to_string(),
            allowed_domain: None,
            frontend_url: "http://localhost:5173".to_string(),
            synthesis_url: "http://127.0.0.1:9/synthesize".to_string(),
            cors_allowed_origins: vec![],
            gcp_project_id: "test-project".to_string(),
            cover_images_path: "data/cover-images.json".to_string(),
            port: 8080,
            google_client_secret: "test_secret".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            oauth_state_key: b"test_oauth_state_key".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
