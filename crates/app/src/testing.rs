//! Test doubles shared by the screen and controller tests.

use api_client::{ApiError, DesignApi, FetchedImage};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::auth::{AuthMode, Credentials};
use shared::design::{GenerationRequest, GenerationResult};
use shared::history::HistoryEntry;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::sync::Semaphore;

use crate::tasks::TaskRunner;

pub fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}

/// Spin until `check` passes, failing the test after five seconds.
pub fn wait_until(mut check: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !check() {
        assert!(Instant::now() < deadline, "timed out waiting for background task");
        std::thread::sleep(Duration::from_millis(5));
    }
}

/// Non-server failures a generation can be scripted to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateFailure {
    /// The response body could not be read as JSON
    Decode,
    /// The request task panics, so the caller never gets an answer
    Panic,
}

/// Scripted `DesignApi`. Replies are `Err(message)` for a 500 with that
/// message in the body.
pub struct FakeApi {
    pub generate_reply: Mutex<Result<GenerationResult, String>>,
    /// Takes precedence over `generate_reply` when set
    pub generate_failure: Mutex<Option<GenerateFailure>>,
    pub auth_reply: Mutex<Result<(), String>>,
    pub history_reply: Mutex<Result<Vec<HistoryEntry>, String>>,
    pub image_reply: Mutex<Result<FetchedImage, String>>,
    pub generate_calls: AtomicUsize,
    pub auth_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub last_request: Mutex<Option<GenerationRequest>>,
    pub last_auth: Mutex<Option<(AuthMode, String, String)>>,
    pub image_urls: Mutex<Vec<String>>,
    hold: AtomicBool,
    gate: Semaphore,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            generate_reply: Mutex::new(Ok(GenerationResult {
                url: "https://cdn.example/generated.jpg".to_string(),
                stored_image: None,
            })),
            generate_failure: Mutex::new(None),
            auth_reply: Mutex::new(Ok(())),
            history_reply: Mutex::new(Ok(Vec::new())),
            image_reply: Mutex::new(Err("Image not found".to_string())),
            generate_calls: AtomicUsize::new(0),
            auth_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            last_auth: Mutex::new(None),
            image_urls: Mutex::new(Vec::new()),
            hold: AtomicBool::new(false),
            gate: Semaphore::new(0),
        }
    }

    /// Keep generation requests in flight until `release_generation`.
    pub fn hold_generation(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub fn release_generation(&self) {
        self.gate.add_permits(1);
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DesignApi for FakeApi {
    async fn generate_design(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, ApiError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some(request);
        if self.hold.load(Ordering::SeqCst) {
            if let Ok(permit) = self.gate.acquire().await {
                permit.forget();
            }
        }
        let failure = *self.generate_failure.lock();
        match failure {
            Some(GenerateFailure::Decode) => {
                return Err(ApiError::Decode("expected value at line 1 column 1".to_string()))
            }
            Some(GenerateFailure::Panic) => panic!("generation backend crashed"),
            None => {}
        }
        let reply = self.generate_reply.lock().clone();
        reply.map_err(|message| ApiError::server(500, message))
    }

    async fn authenticate(&self, mode: AuthMode, credentials: Credentials) -> Result<(), ApiError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_auth.lock() = Some((
            mode,
            credentials.username.clone(),
            credentials.password.clone(),
        ));
        let reply = self.auth_reply.lock().clone();
        reply.map_err(|message| ApiError::server(401, message))
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.history_reply.lock().clone();
        reply.map_err(|message| ApiError::server(500, message))
    }

    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, ApiError> {
        self.image_urls.lock().push(url.to_string());
        let reply = self.image_reply.lock().clone();
        reply.map_err(|message| ApiError::server(404, message))
    }
}

/// A fake API plus a runner on a fresh runtime. Keep the runtime alive for
/// the duration of the test.
pub fn harness() -> (Runtime, TaskRunner, Arc<FakeApi>) {
    let rt = runtime();
    let tasks = TaskRunner::new(rt.handle().clone());
    (rt, tasks, Arc::new(FakeApi::new()))
}

pub fn history_entry(id: i64) -> HistoryEntry {
    HistoryEntry {
        id,
        original_image: format!("https://cdn.example/original_{}.jpg", id),
        generated_image: format!("https://cdn.example/generated_{}.jpg", id),
        style: "bohemian".to_string(),
        room_type: "living room".to_string(),
        timestamp: "2025-03-01 12:30:00".to_string(),
    }
}

/// A tiny valid PNG so decode paths can run.
pub fn png_bytes() -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 120, 40, 255]))
        .write_to(&mut out, image::ImageOutputFormat::Png)
        .unwrap();
    out.into_inner()
}
