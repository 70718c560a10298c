use std::sync::{Arc, Mutex};

use crate::record::SessionRecord;
use crate::session::SessionStore;

/// In-memory SessionStore for testing.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    record: Arc<Mutex<Option<SessionRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<SessionRecord> {
        self.record.lock().ok()?.clone()
    }

    fn save(&self, record: &SessionRecord) -> std::io::Result<()> {
        let mut slot = self
            .record
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        *slot = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        let mut slot = self
            .record
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
