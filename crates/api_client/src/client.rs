use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::auth::{AuthMode, Credentials};
use shared::design::{GenerationRequest, GenerationResult};
use shared::history::HistoryEntry;
use shared::settings::AppSettings;
use std::time::Duration;
use url::Url;

use crate::error::{ApiError, AUTH_FALLBACK, GENERATE_FALLBACK};
use crate::{DesignApi, FetchedImage};

const HISTORY_FALLBACK: &str = "Failed to load history";
const IMAGE_FALLBACK: &str = "Failed to load image";

// ── Wire types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

pub struct DesignClient {
    http: Client,
    base_url: String,
}

impl DesignClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|e| ApiError::InvalidConfig(format!("{}: {}", trimmed, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidConfig(format!(
                "{}: only http and https are supported",
                trimmed
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .build()?;

        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self, ApiError> {
        Self::new(
            &settings.api_base_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Build the `multipart/form-data` body for a generation.
fn generation_form(request: &GenerationRequest) -> Result<Form, ApiError> {
    let image = Part::bytes(request.image.bytes.to_vec())
        .file_name(request.image.name.clone())
        .mime_str(&request.image.mime)?;

    let mut form = Form::new()
        .part("image", image)
        .text("style", request.style.as_str())
        .text("roomType", request.room_type.as_str());

    if let Some(prompt) = &request.custom_prompt {
        form = form.text("customPrompt", prompt.clone());
    }
    Ok(form)
}

/// Turn a non-2xx response into `ApiError::Server`, preferring the body's
/// `error` field over `fallback`.
async fn error_from_response(resp: Response, fallback: &str) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    tracing::warn!(%status, %message, "design service returned an error");
    ApiError::Server { status, message }
}

async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl DesignApi for DesignClient {
    async fn generate_design(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, ApiError> {
        let url = self.endpoint("/generate-designs");
        tracing::info!(
            image = %request.image.name,
            bytes = request.image.bytes.len(),
            style = request.style.as_str(),
            room_type = request.room_type.as_str(),
            custom_prompt = request.custom_prompt.is_some(),
            "submitting generation"
        );

        let form = generation_form(&request)?;
        let resp = self.http.post(&url).multipart(form).send().await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp, GENERATE_FALLBACK).await);
        }

        let result: GenerationResult = decode_json(resp).await?;
        if result.url.trim().is_empty() {
            return Err(ApiError::Decode("response did not include an image url".into()));
        }
        tracing::info!(url = %result.url, "generation finished");
        Ok(result)
    }

    async fn authenticate(&self, mode: AuthMode, credentials: Credentials) -> Result<(), ApiError> {
        let url = self.endpoint(mode.endpoint());
        tracing::debug!(endpoint = mode.endpoint(), username = %credentials.username, "auth request");

        let resp = self
            .http
            .post(&url)
            .json(&credentials)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp, AUTH_FALLBACK).await);
        }
        tracing::info!(endpoint = mode.endpoint(), "auth request succeeded");
        Ok(())
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let url = self.endpoint("/generations");
        let resp = self.http.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp, HISTORY_FALLBACK).await);
        }

        let entries: Vec<HistoryEntry> = decode_json(resp).await?;
        tracing::debug!(count = entries.len(), "fetched history");
        Ok(entries)
    }

    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, ApiError> {
        let resp = self.http.get(url).send().await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp, IMAGE_FALLBACK).await);
        }

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let bytes = resp.bytes().await?.to_vec();
        tracing::debug!(%url, bytes = bytes.len(), "fetched image");

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}
