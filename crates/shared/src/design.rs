//! Style and room catalogues plus the generation request/result records.
//!
//! The wire values (`modern minimalist`, `living room`, ...) are what the
//! generation service matches its prompts against, so they must not change.

use serde::{Deserialize, Serialize};

use crate::upload::ImageUpload;

/// Interior design style sent as the `style` form field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    #[default]
    #[serde(rename = "modern minimalist")]
    ModernMinimalist,
    #[serde(rename = "luxury classic")]
    LuxuryClassic,
    #[serde(rename = "scandinavian")]
    Scandinavian,
    #[serde(rename = "industrial")]
    Industrial,
    #[serde(rename = "bohemian")]
    Bohemian,
    #[serde(rename = "contemporary")]
    Contemporary,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::ModernMinimalist,
        Style::LuxuryClassic,
        Style::Scandinavian,
        Style::Industrial,
        Style::Bohemian,
        Style::Contemporary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::ModernMinimalist => "modern minimalist",
            Style::LuxuryClassic => "luxury classic",
            Style::Scandinavian => "scandinavian",
            Style::Industrial => "industrial",
            Style::Bohemian => "bohemian",
            Style::Contemporary => "contemporary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Style::ModernMinimalist => "Modern Minimalist",
            Style::LuxuryClassic => "Luxury Classic",
            Style::Scandinavian => "Scandinavian",
            Style::Industrial => "Industrial",
            Style::Bohemian => "Bohemian",
            Style::Contemporary => "Contemporary",
        }
    }
}

/// Room classification sent as the `roomType` form field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    #[default]
    #[serde(rename = "living room")]
    LivingRoom,
    #[serde(rename = "bedroom")]
    Bedroom,
    #[serde(rename = "kitchen")]
    Kitchen,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::LivingRoom, RoomType::Bedroom, RoomType::Kitchen];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::LivingRoom => "living room",
            RoomType::Bedroom => "bedroom",
            RoomType::Kitchen => "kitchen",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoomType::LivingRoom => "Living Room",
            RoomType::Bedroom => "Bedroom",
            RoomType::Kitchen => "Kitchen",
        }
    }
}

/// Everything the generation endpoint needs for one submission.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub image: ImageUpload,
    pub style: Style,
    pub room_type: RoomType,
    /// Already trimmed; `None` when the user left the prompt blank
    pub custom_prompt: Option<String>,
}

impl GenerationRequest {
    pub fn new(image: ImageUpload, style: Style, room_type: RoomType, custom_prompt: &str) -> Self {
        let trimmed = custom_prompt.trim();
        Self {
            image,
            style,
            room_type,
            custom_prompt: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }
}

/// Successful generation response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub url: String,
    /// Set when the service also archived the image for the history list
    #[serde(rename = "storedImage", default, skip_serializing_if = "Option::is_none")]
    pub stored_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> ImageUpload {
        ImageUpload::from_bytes("room.png", b"png-bytes".to_vec(), None).unwrap()
    }

    #[test]
    fn test_blank_prompt_is_omitted() {
        let req = GenerationRequest::new(upload(), Style::Bohemian, RoomType::Kitchen, "   \n");
        assert_eq!(req.custom_prompt, None);
    }

    #[test]
    fn test_prompt_is_trimmed() {
        let req = GenerationRequest::new(upload(), Style::default(), RoomType::default(), "  add a fireplace ");
        assert_eq!(req.custom_prompt.as_deref(), Some("add a fireplace"));
    }

    #[test]
    fn test_wire_values_match_as_str() {
        for style in Style::ALL {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{}\"", style.as_str()));
        }
        let room: RoomType = serde_json::from_str("\"living room\"").unwrap();
        assert_eq!(room, RoomType::LivingRoom);
    }

    #[test]
    fn test_result_accepts_stored_image() {
        let json = r#"{"url": "https://x/a.jpg", "storedImage": "https://x/stored.jpg"}"#;
        let result: GenerationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.url, "https://x/a.jpg");
        assert_eq!(result.stored_image.as_deref(), Some("https://x/stored.jpg"));

        let plain: GenerationResult = serde_json::from_str(r#"{"url": "X"}"#).unwrap();
        assert_eq!(plain.stored_image, None);
    }
}
