//! Settings loading: `settings.json` in the platform config directory, then
//! environment overrides. The file is only ever read.

use anyhow::{Context, Result};
use shared::settings::AppSettings;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "DESIGNSPACE_API_URL";
pub const ENV_GALLERY_URL: &str = "DESIGNSPACE_GALLERY_URL";
pub const ENV_REQUIRE_LOGIN: &str = "DESIGNSPACE_REQUIRE_LOGIN";

pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "DesignSpace", "DesignSpace")
        .map(|proj| proj.config_dir().join("settings.json"))
}

/// Parse a settings file. A missing file is `Ok(None)`.
pub fn read_settings_file(path: &Path) -> Result<Option<AppSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let settings = serde_json::from_slice::<AppSettings>(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(settings))
}

/// Apply `DESIGNSPACE_*` overrides read through `lookup`.
pub fn apply_env_overrides(settings: &mut AppSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_API_URL) {
        settings.api_base_url = url;
    }
    if let Some(url) = lookup(ENV_GALLERY_URL) {
        settings.gallery_base_url = Some(url);
    }
    if let Some(flag) = lookup(ENV_REQUIRE_LOGIN) {
        let v = flag.trim().to_ascii_lowercase();
        settings.require_login = !(v == "0" || v == "false" || v == "no");
    }
}

/// Settings from file and environment. Never fails; problems are logged and
/// the defaults are used instead.
pub fn load_settings() -> AppSettings {
    let mut settings = match config_path().map(|p| read_settings_file(&p)) {
        Some(Ok(Some(settings))) => settings,
        Some(Ok(None)) | None => AppSettings::default(),
        Some(Err(e)) => {
            tracing::warn!("ignoring settings file: {:#}", e);
            AppSettings::default()
        }
    };
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings.normalize();
    validate_gallery_url(&mut settings);
    settings
}

fn validate_gallery_url(settings: &mut AppSettings) {
    let Some(gallery) = &settings.gallery_base_url else {
        return;
    };
    let valid = url::Url::parse(gallery)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !valid {
        tracing::warn!(url = %gallery, "invalid gallery URL, hiding example rooms");
        settings.gallery_base_url = None;
    }
}
