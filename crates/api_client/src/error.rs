use reqwest::StatusCode;

/// Shown when a failed generation response carries no `error` field
pub const GENERATE_FALLBACK: &str = "Failed to generate design";
/// Shown when a failed login/register response carries no `error` field
pub const AUTH_FALLBACK: &str = "An error occurred";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the body's `error` field or a fallback.
    #[error("{message} ({status})")]
    Server { status: StatusCode, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Build a server error from a raw status code.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        ApiError::Server {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: message.into(),
        }
    }

    /// Text the UI shows for this error. Server messages pass through
    /// unchanged; everything else gets a friendly fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Transport(e) if e.is_timeout() => {
                "The design service took too long to respond. Please try again.".to_string()
            }
            ApiError::Transport(e) if e.is_connect() => {
                "Could not reach the design service. Please check your internet connection."
                    .to_string()
            }
            ApiError::Transport(_) => AUTH_FALLBACK.to_string(),
            ApiError::Decode(_) => "The design service sent an unexpected response.".to_string(),
            ApiError::InvalidConfig(detail) => format!("Configuration problem: {}", detail),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}
