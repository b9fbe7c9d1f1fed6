//! Top-level screens. `AppState` decides which one is shown.

pub mod login;
pub mod workspace;

pub use login::LoginForm;
pub use workspace::{Workspace, WorkspaceAction};
