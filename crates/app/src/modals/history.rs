//! Past generations, fetched fresh each time the dialog opens.

use api_client::{ApiError, DesignApi};
use egui::{Align2, Context, Id, RichText, Vec2};
use shared::history::HistoryEntry;
use std::sync::Arc;

use super::{backdrop, Modal};
use crate::tasks::{Pending, TaskPoll, TaskRunner};
use crate::widgets::ImageView;

pub const EMPTY_HISTORY_MESSAGE: &str = "No generations found. Try generating some designs!";

const THUMB_SIZE: Vec2 = Vec2::new(220.0, 160.0);

/// A history entry plus its two thumbnails
struct HistoryCard {
    entry: HistoryEntry,
    original: ImageView,
    generated: ImageView,
}

pub struct HistoryModal {
    is_open: bool,
    api: Arc<dyn DesignApi>,
    tasks: TaskRunner,
    fetch: Option<Pending<Result<Vec<HistoryEntry>, ApiError>>>,
    cards: Vec<HistoryCard>,
    id: Id,
}

impl HistoryModal {
    pub fn new(id: impl std::hash::Hash, api: Arc<dyn DesignApi>, tasks: TaskRunner) -> Self {
        Self {
            is_open: false,
            api,
            tasks,
            fetch: None,
            cards: Vec::new(),
            id: Id::new(id),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.cards.iter().map(|card| &card.entry)
    }

    /// Collect the fetched list. A failed fetch leaves the list empty.
    pub fn poll(&mut self) {
        let Some(pending) = &self.fetch else {
            return;
        };
        let entries = match pending.poll() {
            TaskPoll::Pending => return,
            TaskPoll::Ready(Ok(entries)) => entries,
            TaskPoll::Ready(Err(e)) => {
                tracing::warn!("history fetch failed: {}", e);
                Vec::new()
            }
            TaskPoll::Lost => {
                tracing::warn!("history fetch ended without a response");
                Vec::new()
            }
        };
        self.fetch = None;
        tracing::debug!(count = entries.len(), "history loaded");

        self.cards = entries
            .into_iter()
            .map(|entry| {
                let mut original = ImageView::new();
                let mut generated = ImageView::new();
                original.load_url(&self.tasks, &self.api, &entry.original_image);
                generated.load_url(&self.tasks, &self.api, &entry.generated_image);
                HistoryCard {
                    entry,
                    original,
                    generated,
                }
            })
            .collect();
    }

    fn card_ui(ui: &mut egui::Ui, card: &mut HistoryCard) {
        card.original.poll(ui.ctx());
        card.generated.poll(ui.ctx());

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                for (label, view) in [("Original", &card.original), ("Generated", &card.generated)] {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(label).strong());
                        ui.allocate_ui(THUMB_SIZE, |ui| view.ui(ui, THUMB_SIZE));
                    });
                }
            });
            ui.add_space(4.0);
            ui.label(format!("Style: {}", card.entry.style));
            ui.label(format!("Room Type: {}", card.entry.room_type));
            ui.label(
                RichText::new(format!("Generated: {}", card.entry.display_timestamp()))
                    .small()
                    .weak(),
            );
        });
    }
}

impl Modal for HistoryModal {
    fn update(&mut self, ctx: &Context) -> bool {
        if !self.is_open {
            return false;
        }
        self.poll();

        backdrop(ctx, self.id);
        let mut should_close = false;
        let mut window_open = true;

        egui::Window::new("Generation History")
            .id(self.id.with("window"))
            .open(&mut window_open)
            .collapsible(false)
            .resizable(true)
            .default_size([560.0, 600.0])
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                if self.is_loading() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.spinner();
                    });
                    return;
                }
                if self.entries().next().is_none() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(RichText::new(EMPTY_HISTORY_MESSAGE).weak());
                    });
                    return;
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for card in &mut self.cards {
                        Self::card_ui(ui, card);
                        ui.add_space(8.0);
                    }
                });
            });

        if !window_open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            should_close = true;
        }
        let thumbnails_loading = self
            .cards
            .iter()
            .any(|c| c.original.is_loading() || c.generated.is_loading());
        if self.is_loading() || thumbnails_loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        if should_close {
            self.close();
        }
        should_close
    }

    fn is_open(&self) -> bool {
        self.is_open
    }

    fn open(&mut self) {
        self.is_open = true;
        self.cards.clear();
        let api = Arc::clone(&self.api);
        self.fetch = Some(self.tasks.spawn(async move { api.fetch_history().await }));
    }

    fn close(&mut self) {
        self.is_open = false;
        self.fetch = None;
        self.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{harness, history_entry, wait_until};
    use std::sync::atomic::Ordering;

    #[test]
    fn test_open_fetches_list() {
        let (_rt, tasks, fake) = harness();
        *fake.history_reply.lock() = Ok(vec![history_entry(1), history_entry(2)]);
        let mut modal = HistoryModal::new("history", fake.clone(), tasks);

        modal.open();
        assert!(modal.is_open());
        assert!(modal.is_loading());
        wait_until(|| {
            modal.poll();
            !modal.is_loading()
        });

        let ids: Vec<i64> = modal.entries().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(fake.history_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fetch_failure_is_empty_list() {
        let (_rt, tasks, fake) = harness();
        *fake.history_reply.lock() = Err("database locked".to_string());
        let mut modal = HistoryModal::new("history", fake.clone(), tasks);

        modal.open();
        wait_until(|| {
            modal.poll();
            !modal.is_loading()
        });
        assert_eq!(modal.entries().count(), 0);
    }

    #[test]
    fn test_reopen_fetches_again() {
        let (_rt, tasks, fake) = harness();
        *fake.history_reply.lock() = Ok(vec![history_entry(7)]);
        let mut modal = HistoryModal::new("history", fake.clone(), tasks);

        modal.open();
        wait_until(|| {
            modal.poll();
            !modal.is_loading()
        });
        modal.close();
        assert_eq!(modal.entries().count(), 0);

        modal.open();
        wait_until(|| {
            modal.poll();
            !modal.is_loading()
        });
        assert_eq!(fake.history_calls.load(Ordering::SeqCst), 2);
        assert_eq!(modal.entries().count(), 1);
    }
}
