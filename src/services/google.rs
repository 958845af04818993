// SPDX-License-Identifier: MIT

//! Google OAuth login.
//!
//! Handles the authorization-code exchange and userinfo fetch, then folds
//! the returned identity into the local user store: first login for an
//! email creates the user, later logins overwrite the mutable profile
//! fields with whatever Google returned.

use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;
use crate::models::User;
use serde::Deserialize;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Identity assertion from Google's userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    /// Google subject ID
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google OAuth service: code exchange, profile fetch, user upsert.
#[derive(Clone)]
pub struct GoogleAuthService {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
    db: Database,
}

impl GoogleAuthService {
    pub fn new(config: &Config, db: Database) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            callback_url: config.google_callback_url.clone(),
            db,
        }
    }

    /// Build the consent-screen URL the login route redirects to.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            AUTH_ENDPOINT,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.callback_url),
            urlencoding::encode("openid email profile"),
            urlencoding::encode(state),
        )
    }

    /// Complete the OAuth callback: exchange the code, fetch the profile,
    /// and upsert the local user record.
    pub async fn handle_oauth_callback(&self, code: &str) -> Result<User, AppError> {
        let token = self.exchange_code(code).await?;
        let profile = self.fetch_profile(&token.access_token).await?;

        tracing::info!(email = %profile.email, "Google OAuth successful");

        self.complete_login(profile).await
    }

    /// Exchange an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Google token request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(anyhow::anyhow!(
                "Google token exchange failed (HTTP {}): {}",
                status,
                body
            )));
        }

        response.json().await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Google token response parse error: {}", e))
        })
    }

    /// Fetch the OpenID userinfo profile.
    async fn fetch_profile(&self, access_token: &str) -> Result<GoogleProfile, AppError> {
        let response = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Google userinfo failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Google userinfo failed (HTTP {})",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Google userinfo parse error: {}", e))
        })
    }

    /// Turn an identity assertion into a local user record.
    ///
    /// Users are keyed by email across logins: absent creates, present
    /// overwrites names, picture, and Google ID with the latest values.
    pub async fn complete_login(&self, profile: GoogleProfile) -> Result<User, AppError> {
        let now = chrono::Utc::now().to_rfc3339();

        let user = match self.db.find_user_by_email(&profile.email).await? {
            Some(mut user) => {
                user.first_name = profile.given_name;
                user.last_name = profile.family_name;
                user.profile_picture = profile.picture;
                user.google_id = Some(profile.sub);
                user.updated_at = now;
                user
            }
            None => {
                let user = User {
                    id: uuid::Uuid::new_v4().to_string(),
                    email: profile.email,
                    first_name: profile.given_name,
                    last_name: profile.family_name,
                    profile_picture: profile.picture,
                    google_id: Some(profile.sub),
                    created_at: now.clone(),
                    updated_at: now,
                };
                tracing::info!(user_id = %user.id, "Created user on first Google login");
                user
            }
        };

        self.db.upsert_user(&user).await?;
        Ok(user)
    }
}
