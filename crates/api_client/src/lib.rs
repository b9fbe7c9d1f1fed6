//! Client for the DesignSpace HTTP API.
//!
//! `DesignClient` talks to the hosted service. The UI only sees the
//! `DesignApi` trait so screens can be driven by a fake in tests.

pub mod client;
pub mod error;

pub use client::DesignClient;
pub use error::{ApiError, AUTH_FALLBACK, GENERATE_FALLBACK};

use async_trait::async_trait;
use shared::auth::{AuthMode, Credentials};
use shared::design::{GenerationRequest, GenerationResult};
use shared::history::HistoryEntry;

/// Raw image bytes downloaded from a URL
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait DesignApi: Send + Sync {
    /// `POST /generate-designs` with a multipart body.
    async fn generate_design(&self, request: GenerationRequest)
        -> Result<GenerationResult, ApiError>;

    /// `POST /login` or `POST /register` depending on `mode`.
    async fn authenticate(&self, mode: AuthMode, credentials: Credentials) -> Result<(), ApiError>;

    /// `GET /generations`, newest first as the service orders them.
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ApiError>;

    /// Download an image from an absolute URL (results, history, gallery).
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, ApiError>;
}
