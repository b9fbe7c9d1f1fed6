//! View state for one design generation: the selected photo, the chosen
//! style and room, and the outstanding request.

use api_client::{ApiError, DesignApi, GENERATE_FALLBACK};
use shared::design::{GenerationRequest, GenerationResult, RoomType, Style};
use shared::upload::ImageUpload;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::progress::ProgressSimulator;
use crate::tasks::{Pending, TaskPoll, TaskRunner};

pub const NO_IMAGE_MESSAGE: &str = "Please select an image first";

#[derive(Default)]
pub struct GenerationController {
    upload: Option<ImageUpload>,
    style: Style,
    room_type: RoomType,
    /// Bound directly to the prompt text box
    pub custom_prompt: String,
    result: Option<GenerationResult>,
    error: Option<String>,
    progress: ProgressSimulator,
    /// Bumped whenever the photo, style or room changes
    selection: u64,
    /// Selection the outstanding request was built from
    in_flight: Option<(u64, Pending<Result<GenerationResult, ApiError>>)>,
}

impl GenerationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the photo. The previous result and error no longer apply.
    pub fn select_upload(&mut self, upload: ImageUpload) {
        tracing::info!(name = %upload.name, size = %upload.size_label(), "image selected");
        self.upload = Some(upload);
        self.clear_outcome();
    }

    pub fn upload(&self) -> Option<&ImageUpload> {
        self.upload.as_ref()
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn set_style(&mut self, style: Style) {
        if self.style != style {
            self.style = style;
            self.clear_outcome();
        }
    }

    pub fn set_room_type(&mut self, room_type: RoomType) {
        if self.room_type != room_type {
            self.room_type = room_type;
            self.clear_outcome();
        }
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show an input problem (bad file, failed sample download) inline.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_generate(&self) -> bool {
        self.upload.is_some() && !self.is_loading()
    }

    /// Submit the current selection. Returns whether a request was issued.
    pub fn generate(&mut self, api: &Arc<dyn DesignApi>, tasks: &TaskRunner, now: Instant) -> bool {
        if self.is_loading() {
            return false;
        }
        let Some(upload) = self.upload.clone() else {
            self.error = Some(NO_IMAGE_MESSAGE.to_string());
            return false;
        };

        let request = GenerationRequest::new(upload, self.style, self.room_type, &self.custom_prompt);

        self.error = None;
        self.progress.start(now);
        let api = Arc::clone(api);
        let pending = tasks.spawn(async move { api.generate_design(request).await });
        self.in_flight = Some((self.selection, pending));
        true
    }

    /// Collect a finished request. Returns the new result URL on success.
    /// A response for a photo, style or room that has since changed is
    /// dropped.
    pub fn poll(&mut self) -> Option<String> {
        let (submitted, pending) = self.in_flight.as_ref()?;
        let submitted = *submitted;
        let outcome = match pending.poll() {
            TaskPoll::Pending => return None,
            TaskPoll::Ready(outcome) => Some(outcome),
            TaskPoll::Lost => None,
        };
        self.in_flight = None;
        self.progress.finish();

        if submitted != self.selection {
            tracing::debug!("discarding response for an outdated selection");
            return None;
        }

        match outcome {
            Some(Ok(result)) => {
                let url = result.url.clone();
                self.result = Some(result);
                Some(url)
            }
            Some(Err(e)) => {
                tracing::warn!("generation failed: {}", e);
                self.error = Some(e.user_message());
                None
            }
            None => {
                tracing::warn!("generation task ended without a response");
                self.error = Some(GENERATE_FALLBACK.to_string());
                None
            }
        }
    }

    pub fn progress_percent(&self, now: Instant) -> u8 {
        self.progress.percent(now)
    }

    pub fn next_progress_tick(&self, now: Instant) -> Option<Duration> {
        self.progress.next_tick(now)
    }

    fn clear_outcome(&mut self) {
        self.selection += 1;
        self.result = None;
        self.error = None;
    }
}
