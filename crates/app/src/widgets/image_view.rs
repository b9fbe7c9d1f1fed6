//! Image display for the upload preview, the generated result and history
//! thumbnails.
//!
//! Bytes are fetched and decoded in the background; the texture is created on
//! the UI thread once decoding finishes.

use anyhow::{Context as _, Result};
use api_client::DesignApi;
use std::sync::Arc;

use crate::tasks::{Pending, TaskPoll, TaskRunner};

enum Slot {
    Empty,
    Loading(Pending<Result<egui::ColorImage>>),
    Ready(egui::TextureHandle),
    Failed(String),
}

/// One image slot that can be (re)loaded from bytes or a URL.
pub struct ImageView {
    slot: Slot,
    /// Texture name and the URL currently shown, if any
    source: Option<String>,
}

impl Default for ImageView {
    fn default() -> Self {
        Self::new()
    }
}

pub fn decode_color_image(bytes: &[u8]) -> Result<egui::ColorImage> {
    let image = image::load_from_memory(bytes).context("could not decode image")?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &rgba))
}

impl ImageView {
    pub fn new() -> Self {
        Self {
            slot: Slot::Empty,
            source: None,
        }
    }

    /// Decode bytes already in memory (a picked or dropped file).
    pub fn load_bytes(&mut self, tasks: &TaskRunner, name: &str, bytes: Arc<[u8]>) {
        self.source = Some(name.to_string());
        self.slot = Slot::Loading(tasks.spawn_blocking(move || decode_color_image(&bytes)));
    }

    /// Download and decode an image. A no-op when `url` is already shown or
    /// loading.
    pub fn load_url(&mut self, tasks: &TaskRunner, api: &Arc<dyn DesignApi>, url: &str) {
        if self.source.as_deref() == Some(url) && !matches!(self.slot, Slot::Empty) {
            return;
        }
        let api = Arc::clone(api);
        let owned = url.to_string();
        self.source = Some(owned.clone());
        self.slot = Slot::Loading(tasks.spawn(async move {
            let fetched = api
                .fetch_image(&owned)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            tokio::task::spawn_blocking(move || decode_color_image(&fetched.bytes)).await?
        }));
    }

    pub fn clear(&mut self) {
        self.slot = Slot::Empty;
        self.source = None;
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.slot, Slot::Loading(_))
    }

    #[cfg(test)]
    pub fn is_ready(&self) -> bool {
        matches!(self.slot, Slot::Ready(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.slot {
            Slot::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Upload the decoded image to the GPU once it is ready.
    pub fn poll(&mut self, ctx: &egui::Context) {
        let Slot::Loading(pending) = &self.slot else {
            return;
        };
        match pending.poll() {
            TaskPoll::Pending => {}
            TaskPoll::Ready(Ok(color_image)) => {
                let name = self.source().unwrap_or("image").to_string();
                let texture = ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR);
                self.slot = Slot::Ready(texture);
            }
            TaskPoll::Ready(Err(e)) => {
                tracing::warn!(source = ?self.source, "image load failed: {:#}", e);
                self.slot = Slot::Failed(e.to_string());
            }
            TaskPoll::Lost => {
                self.slot = Slot::Failed("Image loading stopped unexpectedly".to_string());
            }
        }
    }

    /// Draw the image scaled to fit `max_size`, never upscaled.
    pub fn ui(&self, ui: &mut egui::Ui, max_size: egui::Vec2) {
        match &self.slot {
            Slot::Empty => {}
            Slot::Loading(_) => {
                ui.spinner();
            }
            Slot::Ready(texture) => {
                let image_size = texture.size_vec2();
                let scale = (max_size.x / image_size.x)
                    .min(max_size.y / image_size.y)
                    .min(1.0);
                ui.add(egui::Image::new(egui::load::SizedTexture::new(
                    texture.id(),
                    image_size * scale,
                )));
            }
            Slot::Failed(error) => {
                ui.label(egui::RichText::new(format!("⚠ {}", error)).weak().small());
            }
        }
    }
}
