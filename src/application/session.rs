//! Login session
//!
//! The session token is an explicit value: it is set at login, cleared at
//! logout, and handed to every outbound call by the caller. A
//! [`TokenStore`] keeps it across process restarts.

use tracing::{debug, info};

use crate::domain::{Credential, DomainError, DomainResult};

/// Persistence for the session token
pub trait TokenStore: Send + Sync {
    fn load(&self) -> DomainResult<Option<Credential>>;
    fn save(&self, credential: &Credential) -> DomainResult<()>;
    fn clear(&self) -> DomainResult<()>;
}

/// Current login state of the console
pub struct SessionContext<S: TokenStore> {
    store: S,
    credential: Option<Credential>,
}

impl<S: TokenStore> SessionContext<S> {
    /// Pick up a token saved by an earlier run, if any.
    pub fn restore(store: S) -> DomainResult<Self> {
        let credential = store.load()?;
        match &credential {
            Some(c) => debug!(session = %c.fingerprint(), "Restored session"),
            None => debug!("No saved session"),
        }
        Ok(Self { store, credential })
    }

    /// Start a session with a freshly issued token.
    pub fn begin(&mut self, credential: Credential) -> DomainResult<()> {
        self.store.save(&credential)?;
        info!(session = %credential.fingerprint(), "Session started");
        self.credential = Some(credential);
        Ok(())
    }

    /// End the session. Returns whether one was active.
    pub fn end(&mut self) -> DomainResult<bool> {
        self.store.clear()?;
        match self.credential.take() {
            Some(c) => {
                info!(session = %c.fingerprint(), "Session ended");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Token for the next request; fails when nobody is logged in.
    pub fn credential(&self) -> DomainResult<&Credential> {
        self.credential.as_ref().ok_or(DomainError::MissingCredential)
    }

    pub fn is_active(&self) -> bool {
        self.credential.is_some()
    }
}
