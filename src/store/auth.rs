// Auth boundary
// Identity supplied by the hosted auth service, and the session handle
// the app passes down instead of reading ambient state

use anyhow::Result;

use crate::models::user::User;

use super::subscription::Subscription;

/// Identity as the auth service reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email_verified: bool,
}

impl AuthUser {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            photo_url: None,
            email_verified: false,
        }
    }
}

/// Listener invoked whenever the signed-in identity changes.
pub type AuthListener = Box<dyn Fn(Option<&AuthUser>) + Send + Sync>;

/// Session creation and teardown against the hosted auth service.
pub trait AuthProvider {
    /// Create an account and sign it in.
    fn register(&self, email: &str, password: &str) -> Result<AuthUser>;

    /// Sign an existing account in.
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser>;

    /// End the current session.
    fn sign_out(&self) -> Result<()>;

    /// The signed-in identity, if any.
    fn current_user(&self) -> Option<AuthUser>;

    /// Watch identity changes. Fires once with the current identity before
    /// returning, then on every sign-in and sign-out.
    fn on_auth_change(&self, listener: AuthListener) -> Subscription;
}

/// Signed-in state handed down to views and services explicitly.
///
/// `profile` is the stored profile matching the identity; it lags behind
/// `auth` until the profile document loads, and stays `None` for accounts
/// with no profile yet.
#[derive(Debug, Clone)]
pub struct Session {
    pub auth: AuthUser,
    pub profile: Option<User>,
}

impl Session {
    pub fn new(auth: AuthUser, profile: Option<User>) -> Self {
        Self { auth, profile }
    }

    pub fn uid(&self) -> &str {
        &self.auth.uid
    }

    /// Best available name: profile name, then the auth display name, then
    /// the email, falling back to the uid.
    pub fn display_name(&self) -> String {
        if let Some(profile) = &self.profile {
            return profile.display_name();
        }
        if let Some(display_name) = &self.auth.display_name {
            return display_name.clone();
        }
        if let Some(email) = &self.auth.email {
            return email.clone();
        }
        self.auth.uid.clone()
    }
}
