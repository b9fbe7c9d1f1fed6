//! Credential types for the login and register endpoints.

use serde::Serialize;
use std::fmt;
use zeroize::Zeroize;

/// Which auth endpoint the login form submits to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn endpoint(&self) -> &'static str {
        match self {
            AuthMode::Login => "/login",
            AuthMode::Register => "/register",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

/// JSON body for `/login` and `/register`.
///
/// The password is wiped when the value is dropped and never shows up in
/// `Debug` output.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
