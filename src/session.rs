//! Explicit session handle.
//!
//! The signed-in user is persisted as a single record in the store. A
//! [`Session`] is the in-memory view of that record, borrowed from the
//! store that backs it and passed to whatever needs the current user.

use log::info;

use crate::app_response::AppResponse;
use crate::models::{AuthState, User};
use crate::record_store::RecordStore;

pub struct Session<'a> {
    store: &'a RecordStore,
    state: AuthState,
}

impl<'a> Session<'a> {
    /// Loads the persisted session; signed out when none exists.
    pub fn restore(store: &'a RecordStore) -> Self {
        Self {
            state: store.auth(),
            store,
        }
    }

    /// Loads the persisted session and signs `default_user` in when nobody
    /// is signed in.
    pub fn restore_or_login(store: &'a RecordStore, default_user: User) -> Result<Self, AppResponse> {
        let mut session = Self::restore(store);
        if session.user().is_none() {
            info!("No active session; signing in {}", default_user.employee_id);
            session.login(default_user)?;
        }
        Ok(session)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    /// The signed-in user. `None` unless the session is authenticated.
    pub fn user(&self) -> Option<&User> {
        if self.state.is_authenticated {
            self.state.user.as_ref()
        } else {
            None
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Persists first; the in-memory state only changes when the write
    /// succeeded.
    pub fn login(&mut self, user: User) -> Result<(), AppResponse> {
        self.state = self.store.login(user)?;
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), AppResponse> {
        self.store.logout()?;
        self.state = AuthState::signed_out();
        Ok(())
    }

    /// Re-reads the persisted record.
    pub fn refresh(&mut self) {
        self.state = self.store.auth();
    }
}
