//! Drop zone for the room photo.
//!
//! Clicking the zone asks the caller to open the file picker; dropping a file
//! anywhere on the window is captured as well.

use egui::{Context, DroppedFile, Id, Rect, Response, Sense, Ui, Vec2};
use std::path::PathBuf;
use std::sync::Arc;

/// A file dropped onto the window. Native builds give a path; some platforms
/// hand over the bytes instead.
#[derive(Debug, Clone)]
pub enum DroppedImage {
    Path(PathBuf),
    Bytes { name: String, bytes: Arc<[u8]> },
}

/// Handler for drag and drop file operations.
pub struct DragDropHandler {
    /// Most recent drop, waiting to be taken
    dropped: Option<DroppedImage>,
    /// Whether files are currently being dragged over
    hovering: bool,
    /// ID for the drop zone
    id: Id,
}

impl DragDropHandler {
    pub fn new(id: impl std::hash::Hash) -> Self {
        Self {
            dropped: None,
            hovering: false,
            id: Id::new(id),
        }
    }

    /// Capture dropped files. Call once per frame.
    pub fn update(&mut self, ctx: &Context) {
        ctx.input(|i| {
            self.hovering = !i.raw.hovered_files.is_empty();

            // Only one photo can be selected; the first dropped file wins
            if let Some(file) = i.raw.dropped_files.first() {
                self.dropped = dropped_image(file);
            }
        });
    }

    /// Take and clear the pending drop.
    pub fn take_dropped(&mut self) -> Option<DroppedImage> {
        self.dropped.take()
    }

    /// Dashed upload area. `content` draws inside it (preview or hint text).
    pub fn show_drop_zone(
        &mut self,
        ui: &mut Ui,
        size: Vec2,
        content: impl FnOnce(&mut Ui),
    ) -> Response {
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        let visuals = if self.hovering || response.hovered() {
            ui.visuals().widgets.hovered
        } else {
            ui.visuals().widgets.inactive
        };

        ui.painter().rect_filled(rect, 8.0, visuals.bg_fill.gamma_multiply(0.5));
        let stroke = if self.hovering {
            egui::Stroke::new(2.0, ui.visuals().selection.bg_fill)
        } else {
            egui::Stroke::new(1.5, visuals.bg_stroke.color)
        };
        dashed_border(ui, rect, stroke);

        let mut child = ui.child_ui(rect.shrink(12.0), egui::Layout::top_down(egui::Align::Center));
        child.vertical_centered(|ui| {
            if self.hovering {
                ui.add_space(rect.height() / 2.0 - 20.0);
                ui.label(egui::RichText::new("📥 Drop the photo here").strong());
            } else {
                content(ui);
            }
        });

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        response
    }

    /// Dim the window while a file is dragged over it.
    pub fn show_drag_overlay(&self, ctx: &Context) {
        if !self.hovering {
            return;
        }

        egui::Area::new(self.id.with("overlay"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                let screen_rect = ctx.screen_rect();
                ui.painter()
                    .rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(100));

                let indicator_rect = Rect::from_center_size(screen_rect.center(), Vec2::new(300.0, 150.0));
                ui.painter().rect(
                    indicator_rect,
                    8.0,
                    ui.visuals().extreme_bg_color,
                    egui::Stroke::new(3.0, ui.visuals().selection.bg_fill),
                );
                ui.painter().text(
                    indicator_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "📥 Drop a room photo",
                    egui::FontId::proportional(18.0),
                    ui.visuals().strong_text_color(),
                );
            });
    }
}

fn dropped_image(file: &DroppedFile) -> Option<DroppedImage> {
    if let Some(path) = &file.path {
        return Some(DroppedImage::Path(path.clone()));
    }
    file.bytes.as_ref().map(|bytes| DroppedImage::Bytes {
        name: file.name.clone(),
        bytes: Arc::clone(bytes),
    })
}

fn dashed_border(ui: &Ui, rect: Rect, stroke: egui::Stroke) {
    let painter = ui.painter();
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    for pair in corners.windows(2) {
        painter.add(egui::Shape::dashed_line(pair, stroke, 8.0, 5.0));
    }
}
