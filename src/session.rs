//! The session context: exactly one authenticated identity at a time.
//!
//! How the identity was obtained (OAuth, social login) is not this crate's
//! concern; the ledger only reads the identity and never mutates session
//! state. Ledger operations treat "no session" as a hard precondition
//! failure, never as a default or shared storage key.

use std::sync::Mutex;

/// The authenticated user's stable identifier plus presentation metadata.
///
/// `display_name` and `photo_url` are carried for consumers that render a
/// header; the ledger itself only uses `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    user_id: String,
    display_name: String,
    photo_url: Option<String>,
}

impl SessionInfo {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            photo_url: None,
        }
    }

    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }
}

/// Holds the current [`SessionInfo`], if any.
///
/// `sign_out` clears the identity synchronously: once it returns, no later
/// `current()` call can observe the signed-out identity. Signing a different
/// user in on the same device therefore cannot leak the prior user's records
/// into the new session.
#[derive(Debug, Default)]
pub struct SessionProvider {
    current: Mutex<Option<SessionInfo>>,
}

impl SessionProvider {
    /// Creates a provider with no authenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `info` as the current identity, replacing any prior one.
    pub fn sign_in(&self, info: SessionInfo) {
        *self.lock() = Some(info);
    }

    /// Clears the current identity.
    pub fn sign_out(&self) {
        *self.lock() = None;
    }

    /// Returns a snapshot of the current identity, or `None` when
    /// unauthenticated.
    pub fn current(&self) -> Option<SessionInfo> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<SessionInfo>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
