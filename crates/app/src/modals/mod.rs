//! Modal dialogs for the application.

pub mod history;

pub use history::HistoryModal;

use egui::Context;

/// Trait for modal dialogs.
pub trait Modal {
    /// Update and render the modal. Returns true if the modal should close.
    fn update(&mut self, ctx: &Context) -> bool;

    /// Returns true if the modal is currently open.
    fn is_open(&self) -> bool;

    /// Open the modal.
    fn open(&mut self);

    /// Close the modal.
    fn close(&mut self);
}

/// Dim everything behind a modal and swallow clicks on it.
pub(crate) fn backdrop(ctx: &Context, id: egui::Id) {
    egui::Area::new(id.with("overlay"))
        .anchor(egui::Align2::LEFT_TOP, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            let screen_rect = ctx.screen_rect();
            ui.allocate_response(screen_rect.size(), egui::Sense::click());
            ui.painter()
                .rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(180));
        });
}
