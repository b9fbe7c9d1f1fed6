//! Sign-in / sign-up form shown before the workspace when login is required.

use api_client::{ApiError, DesignApi, AUTH_FALLBACK};
use egui::{Align, Context, Key, Layout, RichText, TextEdit};
use shared::auth::{AuthMode, Credentials};
use std::sync::Arc;
use zeroize::Zeroizing;

use crate::tasks::{Pending, TaskPoll, TaskRunner};

pub const REGISTERED_MESSAGE: &str = "Registration successful! Please login.";

pub struct LoginForm {
    mode: AuthMode,
    pub username: String,
    /// Securely zeroed on drop
    pub password: Zeroizing<String>,
    error: Option<String>,
    success: Option<String>,
    in_flight: Option<(AuthMode, Pending<Result<(), ApiError>>)>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            username: String::new(),
            password: Zeroizing::new(String::new()),
            error: None,
            success: None,
            in_flight: None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Switch between login and register; any message is stale afterwards.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
        self.success = None;
    }

    pub fn can_submit(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty() && !self.is_submitting()
    }

    /// Send the credentials. Returns false when the form is not ready.
    pub fn submit(&mut self, api: &Arc<dyn DesignApi>, tasks: &TaskRunner) -> bool {
        if !self.can_submit() {
            return false;
        }
        let mode = self.mode;
        let credentials = Credentials::new(self.username.clone(), self.password.as_str());
        tracing::info!(endpoint = mode.endpoint(), username = %self.username, "submitting credentials");

        self.error = None;
        self.success = None;
        let api = Arc::clone(api);
        let pending = tasks.spawn(async move { api.authenticate(mode, credentials).await });
        self.in_flight = Some((mode, pending));
        true
    }

    /// Collect the auth response. Returns true once a login succeeded.
    pub fn poll(&mut self) -> bool {
        let Some((mode, pending)) = &self.in_flight else {
            return false;
        };
        let mode = *mode;
        let outcome = match pending.poll() {
            TaskPoll::Pending => return false,
            TaskPoll::Ready(outcome) => outcome,
            TaskPoll::Lost => Err(ApiError::Decode("auth task ended without a response".into())),
        };
        self.in_flight = None;

        match (mode, outcome) {
            (AuthMode::Login, Ok(())) => {
                tracing::info!(username = %self.username, "logged in");
                true
            }
            (AuthMode::Register, Ok(())) => {
                tracing::info!(username = %self.username, "registered");
                self.mode = AuthMode::Login;
                self.success = Some(REGISTERED_MESSAGE.to_string());
                self.username.clear();
                self.password = Zeroizing::new(String::new());
                false
            }
            (_, Err(e)) => {
                tracing::warn!(endpoint = mode.endpoint(), "auth failed: {}", e);
                self.error = Some(match e {
                    ApiError::Decode(_) => AUTH_FALLBACK.to_string(),
                    other => other.user_message(),
                });
                false
            }
        }
    }

    /// Draw the form. Returns true once a login succeeded.
    pub fn ui(&mut self, ctx: &Context, api: &Arc<dyn DesignApi>, tasks: &TaskRunner) -> bool {
        let logged_in = self.poll();
        if self.is_submitting() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.add_space(ui.available_height() * 0.15);
                ui.label(RichText::new("DESIGNSPACE.AI").size(32.0).strong());
                ui.add_space(4.0);
                let heading = match self.mode() {
                    AuthMode::Login => "Sign in to your account",
                    AuthMode::Register => "Create your account",
                };
                ui.label(RichText::new(heading).size(16.0));
                ui.add_space(20.0);

                egui::Frame::group(ui.style()).inner_margin(16.0).show(ui, |ui| {
                    ui.set_width(320.0);

                    if let Some(error) = self.error() {
                        ui.colored_label(ui.visuals().error_fg_color, error);
                        ui.add_space(8.0);
                    }
                    if let Some(success) = self.success() {
                        ui.colored_label(egui::Color32::from_rgb(60, 170, 90), success);
                        ui.add_space(8.0);
                    }

                    ui.label("Username");
                    ui.add(
                        TextEdit::singleline(&mut self.username)
                            .desired_width(f32::INFINITY)
                            .hint_text("Username"),
                    );
                    ui.add_space(8.0);
                    ui.label("Password");
                    let password = ui.add(
                        TextEdit::singleline(&mut *self.password)
                            .password(true)
                            .desired_width(f32::INFINITY)
                            .hint_text("Password"),
                    );
                    ui.add_space(12.0);

                    let label = match (self.mode(), self.is_submitting()) {
                        (_, true) => "Please wait...",
                        (AuthMode::Login, false) => "Sign in",
                        (AuthMode::Register, false) => "Register",
                    };
                    let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 32.0));
                    let clicked = ui.add_enabled(self.can_submit(), button).clicked();
                    let entered = password.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                    if clicked || entered {
                        self.submit(api, tasks);
                    }

                    ui.add_space(8.0);
                    let toggle = match self.mode() {
                        AuthMode::Login => "Don't have an account? Register",
                        AuthMode::Register => "Already have an account? Sign in",
                    };
                    if ui.link(toggle).clicked() {
                        self.toggle_mode();
                    }
                });
            });
        });

        logged_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{harness, wait_until};

    fn filled(username: &str, password: &str) -> LoginForm {
        let mut form = LoginForm::new();
        form.username = username.to_string();
        *form.password = password.to_string();
        form
    }

    fn settle(form: &mut LoginForm) -> bool {
        let mut logged_in = false;
        wait_until(|| {
            logged_in = form.poll();
            !form.is_submitting()
        });
        logged_in
    }

    #[test]
    fn test_submit_requires_both_fields() {
        let (_rt, tasks, fake) = harness();
        let api: Arc<dyn DesignApi> = fake.clone();

        let mut form = filled("ana", "");
        assert!(!form.can_submit());
        assert!(!form.submit(&api, &tasks));

        let mut form = filled("", "secret");
        assert!(!form.submit(&api, &tasks));
        assert_eq!(fake.auth_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_login_success() {
        let (_rt, tasks, fake) = harness();
        let api: Arc<dyn DesignApi> = fake.clone();
        let mut form = filled("ana", "secret");

        assert!(form.submit(&api, &tasks));
        assert!(settle(&mut form));

        let (mode, username, password) = fake.last_auth.lock().clone().unwrap();
        assert_eq!(mode, AuthMode::Login);
        assert_eq!(username, "ana");
        assert_eq!(password, "secret");
    }

    #[test]
    fn test_register_success_switches_to_login_and_clears() {
        let (_rt, tasks, fake) = harness();
        let api: Arc<dyn DesignApi> = fake.clone();
        let mut form = filled("ana", "secret");
        form.toggle_mode();

        form.submit(&api, &tasks);
        assert!(!settle(&mut form));

        assert_eq!(fake.last_auth.lock().as_ref().map(|a| a.0), Some(AuthMode::Register));
        assert_eq!(form.mode(), AuthMode::Login);
        assert_eq!(form.success(), Some(REGISTERED_MESSAGE));
        assert!(form.username.is_empty());
        assert!(form.password.is_empty());
    }

    #[test]
    fn test_server_error_shown_verbatim() {
        let (_rt, tasks, fake) = harness();
        *fake.auth_reply.lock() = Err("Invalid credentials".to_string());
        let api: Arc<dyn DesignApi> = fake.clone();
        let mut form = filled("ana", "wrong");

        form.submit(&api, &tasks);
        assert!(!settle(&mut form));
        assert_eq!(form.error(), Some("Invalid credentials"));
        assert_eq!(form.username, "ana");
    }

    #[test]
    fn test_toggle_clears_messages() {
        let (_rt, tasks, fake) = harness();
        *fake.auth_reply.lock() = Err("Username already exists".to_string());
        let api: Arc<dyn DesignApi> = fake.clone();
        let mut form = filled("ana", "secret");

        form.submit(&api, &tasks);
        settle(&mut form);
        assert!(form.error().is_some());

        form.toggle_mode();
        assert_eq!(form.mode(), AuthMode::Register);
        assert_eq!(form.error(), None);
        assert_eq!(form.success(), None);
    }
}
