//! Application state and screen routing.
//!
//! The workspace only exists while it is on screen. Logging out drops it,
//! along with any request it still had in flight.

use api_client::DesignApi;
use shared::settings::AppSettings;
use std::sync::Arc;

use crate::screens::{LoginForm, Workspace, WorkspaceAction};
use crate::tasks::TaskRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Login,
    Workspace,
}

pub struct AppState {
    pub settings: AppSettings,
    api: Arc<dyn DesignApi>,
    tasks: TaskRunner,
    logged_in: bool,
    login: LoginForm,
    workspace: Option<Workspace>,
}

impl AppState {
    pub fn new(settings: AppSettings, api: Arc<dyn DesignApi>, tasks: TaskRunner) -> Self {
        Self {
            settings,
            api,
            tasks,
            logged_in: false,
            login: LoginForm::new(),
            workspace: None,
        }
    }

    pub fn current_screen(&self) -> AppScreen {
        if self.settings.require_login && !self.logged_in {
            AppScreen::Login
        } else {
            AppScreen::Workspace
        }
    }

    pub fn login_succeeded(&mut self) {
        self.logged_in = true;
        self.login = LoginForm::new();
    }

    pub fn logout(&mut self) {
        tracing::info!("logged out");
        self.logged_in = false;
        self.workspace = None;
        self.login = LoginForm::new();
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        let (api, tasks) = (&self.api, &self.tasks);
        let gallery = self.settings.gallery_base_url.as_deref();
        self.workspace
            .get_or_insert_with(|| Workspace::new(Arc::clone(api), tasks.clone(), gallery))
    }

    /// Draw whichever screen is current.
    pub fn update(&mut self, ctx: &egui::Context) {
        match self.current_screen() {
            AppScreen::Login => {
                if self.login.ui(ctx, &self.api, &self.tasks) {
                    self.login_succeeded();
                    ctx.request_repaint();
                }
            }
            AppScreen::Workspace => {
                let show_logout = self.settings.require_login;
                if self.workspace_mut().ui(ctx, show_logout) == WorkspaceAction::Logout {
                    self.logout();
                    ctx.request_repaint();
                }
            }
        }
    }
}
