//! The room photo a user selected, held in memory until it is submitted.

use std::path::Path;
use std::sync::Arc;

/// Largest upload the drop zone accepts ("PNG, JPG, GIF up to 10MB")
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Image formats accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageKind {
    pub const EXTENSIONS: [&'static str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

    /// Detect the format from a file name's extension
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Some(ImageKind::Png),
            Some("jpg" | "jpeg") => Some(ImageKind::Jpeg),
            Some("gif") => Some(ImageKind::Gif),
            Some("webp") => Some(ImageKind::Webp),
            _ => None,
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageKind::Png),
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            "image/gif" => Some(ImageKind::Gif),
            "image/webp" => Some(ImageKind::Webp),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
            ImageKind::Webp => "image/webp",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{name} is not a supported image (use PNG, JPG, GIF or WebP)")]
    Unsupported { name: String },

    #[error("{name} is larger than 10MB")]
    TooLarge { name: String },

    #[error("{name} is empty")]
    Empty { name: String },

    #[error("Could not read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// An image picked from disk, dropped on the window, or fetched from the
/// example gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl ImageUpload {
    /// Read and validate an image file.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        if ImageKind::from_name(&name).is_none() {
            return Err(UploadError::Unsupported { name });
        }

        let len = std::fs::metadata(path)
            .map_err(|source| UploadError::Io { name: name.clone(), source })?
            .len();
        if len > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge { name });
        }

        let bytes =
            std::fs::read(path).map_err(|source| UploadError::Io { name: name.clone(), source })?;
        Self::from_bytes(&name, bytes, None)
    }

    /// Wrap bytes obtained elsewhere. `content_type` wins over the file
    /// extension when it names a supported image type.
    pub fn from_bytes(
        name: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<Self, UploadError> {
        let kind = content_type
            .and_then(ImageKind::from_mime)
            .or_else(|| ImageKind::from_name(name))
            .ok_or_else(|| UploadError::Unsupported { name: name.to_string() })?;

        if bytes.is_empty() {
            return Err(UploadError::Empty { name: name.to_string() });
        }
        if bytes.len() as u64 > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge { name: name.to_string() });
        }

        Ok(Self {
            name: name.to_string(),
            mime: kind.mime().to_string(),
            bytes: bytes.into(),
        })
    }

    pub fn size_label(&self) -> String {
        let kb = self.bytes.len() as f64 / 1024.0;
        if kb >= 1024.0 {
            format!("{:.1} MB", kb / 1024.0)
        } else {
            format!("{:.0} KB", kb.max(1.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_kind_from_name_is_case_insensitive() {
        assert_eq!(ImageKind::from_name("Living.JPG"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_name("notes.txt"), None);
        assert_eq!(ImageKind::from_name("no_extension"), None);
    }

    #[test]
    fn test_content_type_overrides_extension() {
        let upload =
            ImageUpload::from_bytes("example-room-1.jpg", vec![1, 2, 3], Some("image/png")).unwrap();
        assert_eq!(upload.mime, "image/png");
    }

    #[test]
    fn test_non_image_content_type_falls_back_to_extension() {
        let upload = ImageUpload::from_bytes(
            "example-room-2.jpg",
            vec![1, 2, 3],
            Some("application/octet-stream"),
        )
        .unwrap();
        assert_eq!(upload.mime, "image/jpeg");
    }

    #[test]
    fn test_rejects_unsupported_and_empty() {
        assert!(matches!(
            ImageUpload::from_bytes("report.pdf", vec![1], None),
            Err(UploadError::Unsupported { .. })
        ));
        assert!(matches!(
            ImageUpload::from_bytes("room.png", Vec::new(), None),
            Err(UploadError::Empty { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_bytes() {
        let big = vec![0u8; MAX_UPLOAD_BYTES as usize + 1];
        assert!(matches!(
            ImageUpload::from_bytes("room.png", big, None),
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kitchen.webp");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"webp-data").unwrap();

        let upload = ImageUpload::from_path(&path).unwrap();
        assert_eq!(upload.name, "kitchen.webp");
        assert_eq!(upload.mime, "image/webp");
        assert_eq!(&*upload.bytes, b"webp-data");
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageUpload::from_path(&dir.path().join("gone.png")).unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
    }
}
