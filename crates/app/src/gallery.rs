//! Example rooms a user can try without a photo of their own.

use api_client::DesignApi;
use shared::upload::ImageUpload;
use std::sync::Arc;

use crate::tasks::{Pending, TaskPoll, TaskRunner};
use crate::widgets::ImageView;

pub const SAMPLE_COUNT: usize = 8;
pub const SAMPLE_FAILED_MESSAGE: &str = "Failed to load example image";

type SampleFetch = Result<ImageUpload, String>;

/// Row of sample thumbnails. Picking one downloads the full image and turns
/// it into an ordinary upload.
pub struct Gallery {
    base_url: String,
    thumbnails: Vec<ImageView>,
    fetching: Option<(usize, Pending<SampleFetch>)>,
}

impl Gallery {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            thumbnails: (0..SAMPLE_COUNT).map(|_| ImageView::new()).collect(),
            fetching: None,
        }
    }

    /// Asset URL for sample `index` (0-based; files are numbered from 1).
    pub fn sample_url(&self, index: usize) -> String {
        format!("{}/rooms/room{}.jpg", self.base_url, index + 1)
    }

    pub fn sample_name(index: usize) -> String {
        format!("example-room-{}.jpg", index + 1)
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.is_some()
    }

    /// Start downloading a sample. Ignored while another one is in flight.
    pub fn request(&mut self, index: usize, api: &Arc<dyn DesignApi>, tasks: &TaskRunner) {
        if self.fetching.is_some() || index >= SAMPLE_COUNT {
            return;
        }
        let api = Arc::clone(api);
        let url = self.sample_url(index);
        let name = Self::sample_name(index);
        tracing::debug!(%url, "fetching example room");

        let pending = tasks.spawn(async move {
            let fetched = api.fetch_image(&url).await.map_err(|e| {
                tracing::warn!(%url, "example image download failed: {}", e);
                SAMPLE_FAILED_MESSAGE.to_string()
            })?;
            ImageUpload::from_bytes(&name, fetched.bytes, fetched.content_type.as_deref()).map_err(|e| {
                tracing::warn!(%url, "example image rejected: {}", e);
                SAMPLE_FAILED_MESSAGE.to_string()
            })
        });
        self.fetching = Some((index, pending));
    }

    /// Finished sample download, if any.
    pub fn poll(&mut self) -> Option<SampleFetch> {
        let (_, pending) = self.fetching.as_ref()?;
        let outcome = match pending.poll() {
            TaskPoll::Pending => return None,
            TaskPoll::Ready(outcome) => outcome,
            TaskPoll::Lost => Err(SAMPLE_FAILED_MESSAGE.to_string()),
        };
        self.fetching = None;
        Some(outcome)
    }

    /// Thumbnail grid. Returns the index the user clicked.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        api: &Arc<dyn DesignApi>,
        tasks: &TaskRunner,
    ) -> Option<usize> {
        let mut clicked = None;
        let busy = self.fetching.as_ref().map(|(index, _)| *index);
        let thumb = egui::vec2(140.0, 100.0);

        for index in 0..SAMPLE_COUNT {
            let url = self.sample_url(index);
            self.thumbnails[index].load_url(tasks, api, &url);
        }

        ui.horizontal_wrapped(|ui| {
            for (index, view) in self.thumbnails.iter_mut().enumerate() {
                view.poll(ui.ctx());
                let response = ui
                    .allocate_ui(thumb + egui::vec2(8.0, 8.0), |ui| {
                        egui::Frame::group(ui.style()).show(ui, |ui| {
                            ui.set_min_size(thumb);
                            if busy == Some(index) {
                                ui.spinner();
                            } else {
                                view.ui(ui, thumb);
                            }
                        });
                    })
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_text(format!("Example room {}", index + 1));
                if response.clicked() && busy.is_none() {
                    clicked = Some(index);
                }
            }
        });
        clicked
    }
}
