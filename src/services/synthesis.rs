// SPDX-License-Identifier: MIT

//! HTTP client for the external synthesis function.
//!
//! The synthesis function converts story text into audio and markup
//! artifacts, writes the story document itself, and mints the story ID.
//! This client only dispatches the request and validates the response
//! shape at the boundary.

use crate::error::AppError;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Outbound call timeout.
const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

// Fixed synthesis parameters; the function currently supports one voice.
const VOICE: &str = "Kajal";
const ENGINE: &str = "neural";
const TEXT_TYPE: &str = "ssml";

/// Payload sent to the synthesis function.
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisRequest {
    pub title: String,
    pub text: String,
    pub settings: SynthesisSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct SynthesisSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    pub language: String,
    pub voice: &'static str,
    pub engine: &'static str,
    #[serde(rename = "textType")]
    pub text_type: &'static str,
}

impl SynthesisRequest {
    pub fn new(title: String, text: String, rate: Option<String>, language: String) -> Self {
        Self {
            title,
            text,
            settings: SynthesisSettings {
                rate,
                language,
                voice: VOICE,
                engine: ENGINE,
                text_type: TEXT_TYPE,
            },
        }
    }
}

/// Validated synthesis result: the minted story ID plus the raw payload,
/// which is echoed back to the API caller.
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    pub story_id: String,
    pub payload: Value,
}

/// Client for the synthesis function endpoint.
#[derive(Clone)]
pub struct SynthesisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SynthesisClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Dispatch a synthesis request and validate the response.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutcome, AppError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .timeout(SYNTHESIS_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::UpstreamTimeout
                } else {
                    AppError::UpstreamUnavailable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message")?.as_str().map(str::to_string))
                .unwrap_or(body);
            return Err(AppError::Upstream { status, message });
        }

        let payload: Value = response.json().await.map_err(|e| {
            AppError::UpstreamContract(format!("response body is not valid JSON: {}", e))
        })?;

        Self::parse_outcome(payload)
    }

    /// Extract and validate the story ID from the response payload.
    fn parse_outcome(payload: Value) -> Result<SynthesisOutcome, AppError> {
        let story_id = payload
            .get("storyId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                AppError::UpstreamContract("response is missing a storyId field".to_string())
            })?
            .to_string();

        Ok(SynthesisOutcome { story_id, payload })
    }
}
