//! Native file dialog for choosing the room photo (rfd).

use shared::upload::ImageKind;
use std::path::PathBuf;

/// Filter for file types.
#[derive(Clone)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Formats the generation service accepts
    pub fn images() -> Self {
        Self::new("Images", &ImageKind::EXTENSIONS)
    }
}

/// Single-file picker that remembers the last folder used.
pub struct FilePickerWidget {
    filters: Vec<FileFilter>,
    start_dir: Option<PathBuf>,
    title: String,
}

impl Default for FilePickerWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePickerWidget {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            start_dir: None,
            title: "Select File".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Blocking pick (opens the native dialog and waits).
    pub fn pick_file(&mut self) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title(&self.title);

        for filter in &self.filters {
            let ext_refs: Vec<&str> = filter.extensions.iter().map(|s| s.as_str()).collect();
            dialog = dialog.add_filter(&filter.name, &ext_refs);
        }

        if let Some(ref dir) = self.start_dir {
            dialog = dialog.set_directory(dir);
        }

        let picked = dialog.pick_file();
        if let Some(parent) = picked.as_ref().and_then(|p| p.parent()) {
            self.start_dir = Some(parent.to_path_buf());
        }
        picked
    }
}
