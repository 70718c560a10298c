//! # Filesystem-backed session store
//!
//! [`FileStore`] is a [`SessionStore`] implementation that keeps the session
//! record in a TOML file so the signed-in state survives app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── session.toml       # SessionRecord, absent when signed out
//! ```
//!
//! ## Platform data directories
//!
//! Use [`FileStore::platform_default`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/launchpad/` |
//! | Linux | `~/.local/share/launchpad/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\launchpad\` |

use std::path::PathBuf;

use crate::record::SessionRecord;
use crate::session::SessionStore;

/// Filesystem-backed SessionStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store under `<data_dir>/<app_name>/`, or `./<app_name>/` when the
    /// platform has no data directory.
    pub fn platform_default(app_name: &str) -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app_name);
        Self::new(base)
    }

    fn session_path(&self) -> PathBuf {
        self.base.join(SessionRecord::filename())
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Option<SessionRecord> {
        let content = std::fs::read_to_string(self.session_path()).ok()?;
        match SessionRecord::from_toml(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file: {}", e);
                None
            }
        }
    }

    fn save(&self, record: &SessionRecord) -> std::io::Result<()> {
        let text = record.to_toml().map_err(std::io::Error::other)?;
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.session_path(), text)
    }

    fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(self.session_path()) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
