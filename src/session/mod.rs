//! Demo session: who is logged in and their profile picture.
//!
//! Plain records in a [`KeyValueStore`]; there is no password or token.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::SessionError;
use crate::storage::KeyValueStore;

pub const USER_KEY: &str = "user";
pub const PROFILE_IMAGE_KEY: &str = "profileImage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
}

#[derive(Debug)]
pub struct SessionManager<S> {
    store: S,
    user: Option<SessionUser>,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store, user: None }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Restores the saved user. A malformed record counts as logged out.
    #[instrument(skip(self))]
    pub fn load(&mut self) -> Result<Option<&SessionUser>, SessionError> {
        self.user = match self.store.get(USER_KEY)? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Failed to load user");
                    None
                }
            },
            None => None,
        };
        Ok(self.user.as_ref())
    }

    #[instrument(skip(self))]
    pub fn login(&mut self, email: &str) -> Result<&SessionUser, SessionError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SessionError::InvalidEmail(email.to_string()));
        }
        let user = SessionUser { email: email.to_string() };
        let json = serde_json::to_string(&user).map_err(crate::error::StorageError::from)?;
        self.store.set(USER_KEY, &json)?;
        info!("User logged in");
        Ok(self.user.insert(user))
    }

    /// Same as [`login`](Self::login) in the demo.
    pub fn signup(&mut self, email: &str) -> Result<&SessionUser, SessionError> {
        self.login(email)
    }

    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.user = None;
        self.store.remove(USER_KEY)?;
        info!("User logged out");
        Ok(())
    }

    pub fn profile_image(&self) -> Result<Option<String>, SessionError> {
        Ok(self.store.get(PROFILE_IMAGE_KEY)?)
    }

    pub fn set_profile_image(&mut self, uri: &str) -> Result<(), SessionError> {
        Ok(self.store.set(PROFILE_IMAGE_KEY, uri)?)
    }
}
