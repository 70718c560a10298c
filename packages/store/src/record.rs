//! # Persisted session record: `session.toml`
//!
//! Defines the small TOML document that tells the rest of the application
//! whether someone is signed in on this device
//! (filename: [`SessionRecord::filename`] = `"session.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! logged_in = true
//! uid = "kX2n9..."
//! email = "ada@example.com"
//! display_name = "Ada"
//! provider = "password"
//! signed_in_at = "2026-10-19T08:12:44Z"
//! ```
//!
//! The record never carries a password or a provider token. A missing or empty
//! file is equivalent to [`SessionRecord::default`], i.e. signed out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session state written to client storage after a successful sign-up.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Provider that authenticated the user (`"password"`, `"google.com"`).
    #[serde(default)]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Create a signed-in record stamped with the current time.
    pub fn signed_in(uid: String, email: String, provider: String) -> Self {
        Self {
            logged_in: true,
            uid,
            email,
            display_name: None,
            provider,
            signed_in_at: Some(Utc::now()),
        }
    }

    /// Builder method to set the display name.
    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        self.display_name = name;
        self
    }

    /// The well-known filename for the session file.
    pub fn filename() -> &'static str {
        "session.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
