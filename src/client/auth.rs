//! Session context: the authenticated identity and credential.
//!
//! Constructed once at application start and passed explicitly through
//! component boundaries (no global mutable state). Init happens on
//! construction, teardown on logout. The context also remembers the
//! destination an unauthenticated user was heading to, so a successful
//! login can resume it.

use std::sync::Mutex;

use crate::domain::{AuthToken, Identity, RoomId};
use crate::infrastructure::api::CredentialSource;

/// A navigation target that can be resumed after login
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Dashboard,
    Room(RoomId),
}

impl Destination {
    /// Path form of the destination, as shown to the user
    pub fn to_path(&self) -> String {
        match self {
            Destination::Dashboard => "/dashboard".to_string(),
            Destination::Room(room_id) => format!("/watchroom/{}", room_id.as_str()),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    identity: Option<Identity>,
    token: Option<AuthToken>,
    redirect_after_login: Option<Destination>,
}

/// Holder of the authenticated session state
///
/// Interior mutability keeps the context shareable between the shell and the
/// HTTP gateway, which re-reads the credential on every request.
#[derive(Debug, Default)]
pub struct SessionContext {
    inner: Mutex<Inner>,
}

impl SessionContext {
    /// Explicit init at application start: no persisted credential is read,
    /// the user always starts logged out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the identity and credential returned by a successful login
    pub fn login(&self, identity: Identity, token: AuthToken) {
        let mut inner = self.lock();
        inner.identity = Some(identity);
        inner.token = Some(token);
    }

    /// Teardown on logout: identity and credential are cleared
    pub fn logout(&self) {
        let mut inner = self.lock();
        inner.identity = None;
        inner.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().identity.is_some()
    }

    /// The authenticated identity. `None` while logged out.
    pub fn identity(&self) -> Option<Identity> {
        self.lock().identity.clone()
    }

    /// The current bearer credential. `None` while logged out.
    pub fn token(&self) -> Option<AuthToken> {
        self.lock().token.clone()
    }

    /// Remember where an unauthenticated user was heading
    pub fn remember_destination(&self, destination: Destination) {
        self.lock().redirect_after_login = Some(destination);
    }

    /// Take (and clear) the remembered destination
    pub fn take_destination(&self) -> Option<Destination> {
        self.lock().redirect_after_login.take()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means another thread panicked mid-update; the
        // contained state is still plain data, so keep going with it.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialSource for SessionContext {
    fn token(&self) -> Option<AuthToken> {
        SessionContext::token(self)
    }
}
