pub mod auth;
pub mod design;
pub mod history;
pub mod upload;

pub mod settings {
    use serde::{Deserialize, Serialize};

    pub const DEFAULT_API_BASE_URL: &str = "https://interior-image-generation.onrender.com/api";

    fn default_timeout_secs() -> u64 {
        120
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AppSettings {
        /// Base URL of the generation/auth/history API, e.g. `https://host/api`
        pub api_base_url: String,
        /// Host serving the example rooms under `/rooms/roomN.jpg`. The API
        /// host does not serve them, so the gallery is hidden until set.
        pub gallery_base_url: Option<String>,
        /// Show the login screen before the workspace
        pub require_login: bool,
        pub dark_mode: bool,
        /// Generation can take a while on the hosted service
        pub request_timeout_secs: u64,
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
                gallery_base_url: None,
                require_login: true,
                dark_mode: true,
                request_timeout_secs: default_timeout_secs(),
            }
        }
    }

    impl AppSettings {
        /// Trim trailing slashes and replace blank URLs with the defaults.
        pub fn normalize(&mut self) {
            self.api_base_url = normalize_base(&self.api_base_url, DEFAULT_API_BASE_URL);
            self.gallery_base_url = self
                .gallery_base_url
                .as_deref()
                .map(|url| url.trim().trim_end_matches('/'))
                .filter(|url| !url.is_empty())
                .map(str::to_string);
            if self.request_timeout_secs == 0 {
                self.request_timeout_secs = default_timeout_secs();
            }
        }
    }

    fn normalize_base(value: &str, fallback: &str) -> String {
        let trimmed = value.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            fallback.to_string()
        } else {
            trimmed.to_string()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_partial_settings_file_uses_defaults() {
            let json = r#"{"api_base_url": "http://localhost:5000/api/", "gallery_base_url": ""}"#;
            let mut settings: AppSettings = serde_json::from_str(json).unwrap();
            settings.normalize();

            assert_eq!(settings.api_base_url, "http://localhost:5000/api");
            assert_eq!(settings.gallery_base_url, None);
            assert!(settings.require_login);
            assert_eq!(settings.request_timeout_secs, 120);
        }

        #[test]
        fn test_gallery_is_off_by_default() {
            assert_eq!(AppSettings::default().gallery_base_url, None);

            let json = r#"{"gallery_base_url": "https://rooms.example/ "}"#;
            let mut settings: AppSettings = serde_json::from_str(json).unwrap();
            settings.normalize();
            assert_eq!(settings.gallery_base_url.as_deref(), Some("https://rooms.example"));
        }
    }
}
