//! The main screen: upload a room, pick a style, generate, and browse past
//! results.

use api_client::DesignApi;
use egui::{Context, RichText};
use shared::design::{RoomType, Style};
use shared::upload::ImageUpload;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::gallery::Gallery;
use crate::modals::{HistoryModal, Modal};
use crate::tasks::TaskRunner;
use crate::widgets::{DragDropHandler, DroppedImage, FileFilter, FilePickerWidget, ImageView};
use crate::workflow::GenerationController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceAction {
    None,
    Logout,
}

pub struct Workspace {
    api: Arc<dyn DesignApi>,
    tasks: TaskRunner,
    pub controller: GenerationController,
    preview: ImageView,
    result: ImageView,
    history: HistoryModal,
    /// Only present when a gallery host is configured
    gallery: Option<Gallery>,
    picker: FilePickerWidget,
    drop: DragDropHandler,
}

impl Workspace {
    pub fn new(api: Arc<dyn DesignApi>, tasks: TaskRunner, gallery_base_url: Option<&str>) -> Self {
        Self {
            history: HistoryModal::new("history", Arc::clone(&api), tasks.clone()),
            gallery: gallery_base_url.map(Gallery::new),
            picker: FilePickerWidget::new()
                .with_title("Choose a room photo")
                .with_filter(FileFilter::images()),
            drop: DragDropHandler::new("room_drop"),
            controller: GenerationController::new(),
            preview: ImageView::new(),
            result: ImageView::new(),
            api,
            tasks,
        }
    }

    /// Use `upload` as the room photo and start decoding its preview.
    pub fn select_upload(&mut self, upload: ImageUpload) {
        self.preview
            .load_bytes(&self.tasks, &upload.name, Arc::clone(&upload.bytes));
        self.result.clear();
        self.controller.select_upload(upload);
    }

    /// Validate and load a file from disk; problems are shown inline.
    pub fn handle_path(&mut self, path: &Path) {
        match ImageUpload::from_path(path) {
            Ok(upload) => self.select_upload(upload),
            Err(e) => {
                tracing::warn!(path = %path.display(), "rejected upload: {}", e);
                self.controller.report_error(e.to_string());
            }
        }
    }

    fn handle_drop(&mut self, dropped: DroppedImage) {
        match dropped {
            DroppedImage::Path(path) => self.handle_path(&path),
            DroppedImage::Bytes { name, bytes } => {
                match ImageUpload::from_bytes(&name, bytes.to_vec(), None) {
                    Ok(upload) => self.select_upload(upload),
                    Err(e) => self.controller.report_error(e.to_string()),
                }
            }
        }
    }

    /// Start a generation with the current selection.
    pub fn generate(&mut self) -> bool {
        self.controller.generate(&self.api, &self.tasks, Instant::now())
    }

    /// Pick up finished background work. Called once per frame.
    pub fn poll(&mut self, ctx: &Context) {
        self.drop.update(ctx);
        if let Some(dropped) = self.drop.take_dropped() {
            self.handle_drop(dropped);
        }

        if let Some(url) = self.controller.poll() {
            self.result.load_url(&self.tasks, &self.api, &url);
        }
        if let Some(sample) = self.gallery.as_mut().and_then(Gallery::poll) {
            match sample {
                Ok(upload) => self.select_upload(upload),
                Err(message) => self.controller.report_error(message),
            }
        }

        self.preview.poll(ctx);
        self.result.poll(ctx);
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_loading()
            || self.gallery.as_ref().is_some_and(Gallery::is_fetching)
            || self.preview.is_loading()
            || self.result.is_loading()
    }

    pub fn ui(&mut self, ctx: &Context, show_logout: bool) -> WorkspaceAction {
        self.poll(ctx);
        let now = Instant::now();
        let mut action = WorkspaceAction::None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new("DESIGNSPACE.AI").size(24.0).strong());
                    ui.label(RichText::new("ROOM TRANSFORMATION | INSTANTLY").small().weak());
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(12.0);
                    if show_logout && ui.button("Logout").clicked() {
                        action = WorkspaceAction::Logout;
                    }
                    if ui.button("📜 View History").clicked() {
                        self.history.open();
                    }
                });
            });
            ui.add_space(10.0);
        });

        egui::SidePanel::right("controls")
            .resizable(false)
            .exact_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.controls_ui(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.result_ui(ui, now);
                let Some(gallery) = self.gallery.as_mut() else {
                    return;
                };
                ui.add_space(16.0);
                ui.separator();
                ui.label(RichText::new("Example Rooms").strong());
                ui.label(RichText::new("No photo handy? Start from one of these.").small().weak());
                ui.add_space(6.0);
                if let Some(index) = gallery.ui(ui, &self.api, &self.tasks) {
                    gallery.request(index, &self.api, &self.tasks);
                }
            });
        });

        self.drop.show_drag_overlay(ctx);
        if self.history.is_open() {
            self.history.update(ctx);
        }

        if let Some(wait) = self.controller.next_progress_tick(now) {
            ctx.request_repaint_after(wait);
        } else if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        action
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);

        ui.label(RichText::new("Room Type").strong());
        let mut room_type = self.controller.room_type();
        egui::ComboBox::from_id_source("room_type")
            .width(ui.available_width())
            .selected_text(room_type.label())
            .show_ui(ui, |ui| {
                for option in RoomType::ALL {
                    ui.selectable_value(&mut room_type, option, option.label());
                }
            });
        self.controller.set_room_type(room_type);
        ui.add_space(10.0);

        ui.label(RichText::new("Design Style").strong());
        let mut style = self.controller.style();
        egui::ComboBox::from_id_source("design_style")
            .width(ui.available_width())
            .selected_text(style.label())
            .show_ui(ui, |ui| {
                for option in Style::ALL {
                    ui.selectable_value(&mut style, option, option.label());
                }
            });
        self.controller.set_style(style);
        ui.add_space(10.0);

        ui.label(RichText::new("Room Photo").strong());
        let zone = egui::vec2(ui.available_width(), 220.0);
        let preview = &self.preview;
        let upload = self.controller.upload();
        let response = self.drop.show_drop_zone(ui, zone, |ui| {
            if let Some(upload) = upload {
                preview.ui(ui, zone - egui::vec2(24.0, 48.0));
                ui.label(
                    RichText::new(format!("{} ({})", upload.name, upload.size_label()))
                        .small()
                        .weak(),
                );
            } else {
                ui.add_space(60.0);
                ui.label(RichText::new("📤 Upload a file").strong());
                ui.label(RichText::new("or drag and drop").small());
                ui.label(RichText::new("PNG, JPG, GIF up to 10MB").small().weak());
            }
        });
        if response.clicked() {
            if let Some(path) = self.picker.pick_file() {
                self.handle_path(&path);
            }
        }
        ui.add_space(10.0);

        ui.label(RichText::new("Custom Prompt (Optional)").strong());
        ui.add(
            egui::TextEdit::multiline(&mut self.controller.custom_prompt)
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text("e.g. add warm lighting and a reading nook"),
        );
        ui.add_space(12.0);

        let loading = self.controller.is_loading();
        let label = if loading { "Generating..." } else { "Generate Design" };
        let button = egui::Button::new(RichText::new(label).strong())
            .min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add_enabled(self.controller.can_generate(), button).clicked() {
            self.generate();
        }

        if let Some(error) = self.controller.error() {
            ui.add_space(8.0);
            ui.colored_label(ui.visuals().error_fg_color, error);
        }
    }

    fn result_ui(&mut self, ui: &mut egui::Ui, now: Instant) {
        let area = egui::vec2(ui.available_width(), 420.0);

        if self.controller.is_loading() {
            let percent = self.controller.progress_percent(now);
            ui.add_space(120.0);
            ui.vertical_centered(|ui| {
                ui.add(
                    egui::ProgressBar::new(percent as f32 / 100.0)
                        .desired_width(area.x * 0.6)
                        .text(format!("{}%", percent)),
                );
                ui.add_space(8.0);
                ui.label("Generating your design...");
            });
            return;
        }

        if let Some(result) = self.controller.result() {
            let url = result.url.clone();
            ui.vertical_centered(|ui| {
                self.result.ui(ui, area);
                if self.result.error().is_some() {
                    ui.label(RichText::new("The preview could not be shown here.").small().weak());
                }
                ui.add_space(8.0);
                if ui.button("🌐 Open in browser").clicked() {
                    if let Err(e) = open::that(&url) {
                        tracing::warn!(%url, "could not open browser: {}", e);
                    }
                }
            });
            return;
        }

        ui.add_space(180.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Generated design will appear here").weak());
        });
    }
}
