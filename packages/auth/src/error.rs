//! Error types for the provider binding layer.
//!
//! [`ProviderError`] is what every [`IdentityProvider`](crate::IdentityProvider)
//! call fails with. Its [`AuthErrorKind`] is decided here, once, from the
//! provider's error code, so callers switch on a kind instead of inspecting
//! message text.

use thiserror::Error;

/// Classification of a failed identity-provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    InvalidEmail,
    EmailAlreadyInUse,
    WeakPassword,
    /// The user closed or denied the federated consent screen.
    PopupClosed,
    /// Federated sign-in was requested but no OAuth client is configured.
    NotConfigured,
    /// The request never produced a provider answer (network, TLS, decoding).
    Transport,
    Other,
}

impl AuthErrorKind {
    /// Map a provider error code to a kind.
    ///
    /// Accepts Identity Toolkit REST codes (`EMAIL_EXISTS`,
    /// `WEAK_PASSWORD : Password should be at least 6 characters`) as well as
    /// client SDK codes (`auth/email-already-in-use`).
    pub fn from_code(code: &str) -> Self {
        let code = code.split(" : ").next().unwrap_or(code).trim();
        match code {
            "INVALID_EMAIL" | "auth/invalid-email" => Self::InvalidEmail,
            "EMAIL_EXISTS" | "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "WEAK_PASSWORD" | "auth/weak-password" => Self::WeakPassword,
            "auth/popup-closed-by-user" | "auth/cancelled-popup-request" | "access_denied" => {
                Self::PopupClosed
            }
            _ => Self::Other,
        }
    }
}

/// A failed call to the identity provider.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build an error from a provider error code, keeping the code as message.
    pub fn from_code(code: &str) -> Self {
        Self::new(AuthErrorKind::from_code(code), code)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(AuthErrorKind::Transport, e.to_string())
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(e: std::io::Error) -> Self {
        Self::new(AuthErrorKind::Transport, e.to_string())
    }
}

/// A failed request to the user-record service.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("user service rejected the record with status {status}")]
    Rejected { status: u16 },
}

/// Missing or malformed configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("invalid URL for {name}: {reason}")]
    InvalidUrl { name: &'static str, reason: String },
}
