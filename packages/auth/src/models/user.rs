//! # User models for authenticated users
//!
//! Three representations of a user, each with a different audience:
//!
//! ## [`AuthUser`]
//!
//! The credential handle returned by the identity provider after account
//! creation or federated sign-in. It carries the provider's `id_token`, which
//! authorises follow-up calls such as a profile update, so it stays inside the
//! process and is never serialised.
//!
//! ## [`UserInfo`]
//!
//! A client-safe subset used by the UI. The helper [`UserInfo::display_name`]
//! returns the user's name or falls back to their email address.
//!
//! ## [`NewUserRecord`]
//!
//! The body sent to the user-record service when an account is created. It is
//! built only from an [`AuthUser`], which has no password field, so a raw
//! password can never reach the persistence layer.

use serde::{Deserialize, Serialize};

/// Provider id for email + password accounts.
pub const PASSWORD_PROVIDER: &str = "password";
/// Provider id for Google accounts.
pub const GOOGLE_PROVIDER: &str = "google.com";

/// Credential returned by the identity provider.
#[derive(Clone, PartialEq)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub provider_id: String,
    pub id_token: String,
}

impl AuthUser {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.uid.clone(),
            email: self.email.clone(),
            name: self.display_name.clone(),
            avatar_url: self.photo_url.clone(),
            provider: self.provider_id.clone(),
        }
    }
}

impl std::fmt::Debug for AuthUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthUser")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("provider_id", &self.provider_id)
            .finish_non_exhaustive()
    }
}

/// User information safe to hand to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Profile fields to change on the provider side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
}

impl ProfileUpdate {
    pub fn display_name(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
        }
    }
}

/// Record sent to the user-record service after sign-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRecord {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub provider: String,
}

impl From<&AuthUser> for NewUserRecord {
    fn from(user: &AuthUser) -> Self {
        Self {
            uid: user.uid.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            provider: user.provider_id.clone(),
        }
    }
}
