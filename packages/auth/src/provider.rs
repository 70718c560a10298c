//! Seams to the external services the sign-up flow depends on.

use crate::error::{DirectoryError, ProviderError};
use crate::models::{AuthUser, ProfileUpdate};

/// Account creation and sign-in, as offered by the identity provider.
pub trait IdentityProvider {
    /// Create an email + password account and sign it in.
    fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<AuthUser, ProviderError>>;

    /// Change profile fields of an authenticated user.
    fn update_profile(
        &self,
        user: &AuthUser,
        profile: &ProfileUpdate,
    ) -> impl std::future::Future<Output = Result<(), ProviderError>>;

    /// Run the federated (Google) sign-in flow.
    fn sign_in_with_federated_provider(
        &self,
    ) -> impl std::future::Future<Output = Result<AuthUser, ProviderError>>;
}

/// Backend service that keeps the application's own user records.
pub trait UserDirectory {
    fn register_user(
        &self,
        user: &AuthUser,
    ) -> impl std::future::Future<Output = Result<(), DirectoryError>>;
}
