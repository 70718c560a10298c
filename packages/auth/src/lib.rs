//! # Auth crate: provider binding layer for Launchpad
//!
//! Everything the sign-up flow needs from the outside world sits behind the two
//! traits in [`provider`], with production implementations alongside:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`provider`] | [`IdentityProvider`] and [`UserDirectory`] seams |
//! | [`firebase`] | [`FirebaseAuth`], the Identity Toolkit REST client |
//! | [`oauth`] | Google OAuth with PKCE and the loopback "popup" used for federated sign-up |
//! | [`directory`] | [`HttpUserDirectory`], the user-record service client |
//! | [`config`] | [`AuthConfig`] loaded from environment variables |
//! | [`error`] | [`ProviderError`] with its structured [`AuthErrorKind`], plus directory and config errors |
//! | [`models`] | [`AuthUser`] credential, client-safe [`UserInfo`], persisted [`NewUserRecord`] |

pub mod config;
pub mod directory;
pub mod error;
pub mod firebase;
pub mod models;
pub mod oauth;
pub mod provider;

pub use config::{AuthConfig, GoogleConfig};
pub use directory::HttpUserDirectory;
pub use error::{AuthErrorKind, ConfigError, DirectoryError, ProviderError};
pub use firebase::FirebaseAuth;
pub use models::{AuthUser, NewUserRecord, ProfileUpdate, UserInfo};
pub use provider::{IdentityProvider, UserDirectory};
