//! # Session: process-wide signed-in state
//!
//! [`Session`] is the single object the application consults to know whether
//! someone is signed in. It keeps the current [`SessionRecord`] in memory and
//! mirrors every transition to a [`SessionStore`] so the state survives restarts.
//!
//! ## Transitions
//!
//! | Method | When |
//! |--------|------|
//! | [`restore`](Session::restore) | App start. Loads the persisted record, if any. |
//! | [`init`](Session::init) | After the identity provider accepted a sign-up. |
//! | [`teardown`](Session::teardown) | On sign-out. Clears memory and storage. |
//!
//! Storage failures never leave memory and disk disagreeing about a sign-out:
//! `teardown` drops the in-memory record before touching the store.

use std::sync::{Arc, Mutex};

use crate::record::SessionRecord;

/// Key/value backend for the persisted session record.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<SessionRecord>;
    fn save(&self, record: &SessionRecord) -> std::io::Result<()>;
    fn clear(&self) -> std::io::Result<()>;
}

/// Shared handle to the signed-in state. Clones refer to the same session.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
    current: Arc<Mutex<Option<SessionRecord>>>,
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Load the persisted record into memory. Signed-out records are ignored.
    pub fn restore(&self) -> Option<SessionRecord> {
        let record = self.store.load().filter(|r| r.logged_in);
        if let Some(ref r) = record {
            tracing::debug!(uid = %r.uid, "restored session");
        }
        *self.lock() = record.clone();
        record
    }

    /// Start a session for a freshly authenticated user.
    ///
    /// The in-memory state is updated even if persisting fails; the error is
    /// returned so the caller can report it.
    pub fn init(&self, record: SessionRecord) -> std::io::Result<()> {
        let record = SessionRecord {
            logged_in: true,
            ..record
        };
        *self.lock() = Some(record.clone());
        self.store.save(&record)
    }

    /// End the session and remove it from storage.
    pub fn teardown(&self) -> std::io::Result<()> {
        self.lock().take();
        self.store.clear()
    }

    pub fn current(&self) -> Option<SessionRecord> {
        self.lock().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<SessionRecord>> {
        // Poisoned only by a panic mid-assignment; the Option is still valid.
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.current, &other.current)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}
