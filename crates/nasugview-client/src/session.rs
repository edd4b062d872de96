//! Who is signed in.
//!
//! The [`SessionManager`] is created once at start-up around the local
//! database and handed to every screen that needs the username. Only the
//! username is persisted; photo paths live for the process lifetime.

use std::sync::{Mutex, MutexGuard, PoisonError};

use nasugview_shared::{PhotoKind, UserProfile};
use nasugview_store::Database;
use tracing::info;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn(UserProfile),
}

impl Session {
    pub fn username(&self) -> Option<&str> {
        match self {
            Session::SignedIn(profile) => Some(&profile.username),
            Session::SignedOut => None,
        }
    }
}

struct Inner {
    db: Database,
    session: Session,
}

pub struct SessionManager {
    inner: Mutex<Inner>,
}

impl SessionManager {
    /// Starts signed out; call [`restore`](Self::restore) to pick up a
    /// previous sign-in.
    pub fn new(db: Database) -> Self {
        Self {
            inner: Mutex::new(Inner {
                db,
                session: Session::SignedOut,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the persisted username, if any, and sign it in.
    pub fn restore(&self) -> Result<Session, ClientError> {
        let mut inner = self.lock();
        inner.session = match inner.db.load_username()? {
            Some(username) => {
                info!(%username, "Restored session");
                Session::SignedIn(UserProfile::named(username))
            }
            None => Session::SignedOut,
        };
        Ok(inner.session.clone())
    }

    pub fn sign_in(&self, profile: UserProfile) -> Result<(), ClientError> {
        if profile.username.trim().is_empty() {
            return Err(ClientError::NotSignedIn);
        }
        let mut inner = self.lock();
        inner.db.save_username(&profile.username)?;
        info!(username = %profile.username, "Signed in");
        inner.session = Session::SignedIn(profile);
        Ok(())
    }

    /// Remove the stored username. Signing out twice is harmless.
    pub fn sign_out(&self) -> Result<(), ClientError> {
        let mut inner = self.lock();
        let removed = inner.db.clear_username()?;
        if let Some(username) = inner.session.username() {
            info!(%username, removed, "Signed out");
        }
        inner.session = Session::SignedOut;
        Ok(())
    }

    pub fn current(&self) -> Session {
        self.lock().session.clone()
    }

    pub fn username(&self) -> Result<String, ClientError> {
        self.lock()
            .session
            .username()
            .map(str::to_string)
            .ok_or(ClientError::NotSignedIn)
    }

    /// Record a photo path returned by an upload.
    pub fn set_photo(&self, kind: PhotoKind, path: String) -> Result<(), ClientError> {
        let mut inner = self.lock();
        match &mut inner.session {
            Session::SignedIn(profile) => {
                match kind {
                    PhotoKind::Profile => profile.profile_image = Some(path),
                    PhotoKind::Cover => profile.cover_image = Some(path),
                }
                Ok(())
            }
            Session::SignedOut => Err(ClientError::NotSignedIn),
        }
    }
}
