use anyhow::Context as _;
use api_client::{DesignApi, DesignClient};
use eframe::egui;
use parking_lot::Mutex;
use shared::settings::AppSettings;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod gallery;
mod modals;
mod progress;
mod screens;
mod state;
mod tasks;
mod widgets;
mod workflow;

#[cfg(test)]
mod testing;

use state::AppState;
use tasks::TaskRunner;

/// Client for the configured service. A bad API URL falls back to the
/// hosted default so the app still starts.
fn build_client(settings: &AppSettings) -> anyhow::Result<DesignClient> {
    match DesignClient::from_settings(settings) {
        Ok(client) => Ok(client),
        Err(e) => {
            tracing::warn!(url = %settings.api_base_url, "{}; using the default service", e);
            let fallback = AppSettings {
                api_base_url: shared::settings::DEFAULT_API_BASE_URL.to_string(),
                ..settings.clone()
            };
            DesignClient::from_settings(&fallback).context("building HTTP client")
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = config::load_settings();
    tracing::info!(api = %settings.api_base_url, require_login = settings.require_login, "starting DesignSpace");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("designspace-io")
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let tasks = TaskRunner::new(runtime.handle().clone());
    let api: Arc<dyn DesignApi> = Arc::new(build_client(&settings)?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        vsync: true,
        ..Default::default()
    };
    eframe::run_native(
        "DesignSpace",
        options,
        Box::new(move |_cc| {
            Box::new(DesignSpaceApp {
                state: Arc::new(Mutex::new(AppState::new(settings, api, tasks))),
                _runtime: runtime,
            })
        }),
    )
    .map_err(|e| anyhow::anyhow!("window error: {}", e))
}

struct DesignSpaceApp {
    state: Arc<Mutex<AppState>>,
    /// Owns the worker threads; dropped when the window closes
    _runtime: tokio::runtime::Runtime,
}

impl eframe::App for DesignSpaceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut s = self.state.lock();
        apply_theme(ctx, s.settings.dark_mode);
        s.update(ctx);
    }
}

fn apply_theme(ctx: &egui::Context, dark: bool) {
    let mut style = (*ctx.style()).clone();
    style.visuals = if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    style.visuals.window_rounding = egui::Rounding::same(12.0);
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);

    let accent = if dark {
        style.visuals.panel_fill = egui::Color32::from_rgb(30, 30, 35);
        egui::Color32::from_rgb(100, 180, 255)
    } else {
        style.visuals.panel_fill = egui::Color32::from_rgb(250, 250, 252);
        egui::Color32::from_rgb(50, 100, 200)
    };
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(2.0, accent);
    style.visuals.selection.stroke = egui::Stroke::new(2.0, accent);
    ctx.set_style(style);
}
