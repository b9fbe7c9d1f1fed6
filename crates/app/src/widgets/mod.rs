//! Reusable widgets for the application.

pub mod drag_drop;
pub mod file_picker;
pub mod image_view;

pub use drag_drop::{DragDropHandler, DroppedImage};
pub use file_picker::{FileFilter, FilePickerWidget};
pub use image_view::ImageView;
