//! # Firebase Authentication over the Identity Toolkit REST API
//!
//! [`FirebaseAuth`] implements [`IdentityProvider`] with three endpoints:
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | [`create_account`](IdentityProvider::create_account) | `POST /v1/accounts:signUp` |
//! | [`update_profile`](IdentityProvider::update_profile) | `POST /v1/accounts:update` |
//! | [`sign_in_with_federated_provider`](IdentityProvider::sign_in_with_federated_provider) | Google consent via [`LoopbackPopup`], then `POST /v1/accounts:signInWithIdp` |
//!
//! Every request carries the project's web API key as `?key=`. Failed requests
//! answer with an envelope such as
//!
//! ```json
//! { "error": { "code": 400, "message": "EMAIL_EXISTS" } }
//! ```
//!
//! whose `message` is turned into a [`ProviderError`] with the matching
//! [`AuthErrorKind`](crate::AuthErrorKind).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AuthErrorKind, ProviderError};
use crate::models::{AuthUser, ProfileUpdate, GOOGLE_PROVIDER, PASSWORD_PROVIDER};
use crate::oauth::{GoogleOAuth, LoopbackPopup};
use crate::provider::IdentityProvider;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpRequest {
    post_body: String,
    request_uri: &'static str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

/// Response of `signUp` and `signInWithIdp`; fields absent from one of them
/// default to empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct UpdateResponse {}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Identity Toolkit client bound to one Firebase project.
#[derive(Debug, Clone)]
pub struct FirebaseAuth {
    config: AuthConfig,
    http: reqwest::Client,
    popup: Option<LoopbackPopup>,
}

impl FirebaseAuth {
    /// Create a client. Google sign-up is enabled when the config has a
    /// Google OAuth client.
    pub fn new(config: AuthConfig) -> Result<Self, ProviderError> {
        let popup = match &config.google {
            Some(google) => Some(LoopbackPopup::new(GoogleOAuth::new(google.clone())?)),
            None => None,
        };
        Ok(Self {
            config,
            http: reqwest::Client::new(),
            popup,
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.config.identity_toolkit_url.trim_end_matches('/'),
            method,
            self.config.api_key
        )
    }

    async fn call<B: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<R, ProviderError> {
        let response = self
            .http
            .post(self.endpoint(method))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => ProviderError::from_code(&envelope.error.message),
                Err(_) => ProviderError::new(
                    AuthErrorKind::Other,
                    format!("accounts:{} failed with status {}", method, status),
                ),
            });
        }

        Ok(response.json().await?)
    }

    /// Trade a Google access token for a Firebase user.
    pub async fn sign_in_with_google_token(
        &self,
        access_token: &str,
    ) -> Result<AuthUser, ProviderError> {
        let request = SignInWithIdpRequest {
            post_body: format!("access_token={access_token}&providerId={GOOGLE_PROVIDER}"),
            request_uri: "http://localhost",
            return_idp_credential: true,
            return_secure_token: true,
        };
        let account: AccountResponse = self.call("signInWithIdp", &request).await?;
        Ok(account.into_user(GOOGLE_PROVIDER))
    }
}

impl AccountResponse {
    fn into_user(self, provider_id: &str) -> AuthUser {
        AuthUser {
            uid: self.local_id,
            email: self.email,
            display_name: self.display_name.filter(|n| !n.is_empty()),
            photo_url: self.photo_url,
            provider_id: provider_id.to_string(),
            id_token: self.id_token,
        }
    }
}

impl IdentityProvider for FirebaseAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, ProviderError> {
        let request = SignUpRequest {
            email,
            password,
            return_secure_token: true,
        };
        let account: AccountResponse = self.call("signUp", &request).await?;
        tracing::debug!(uid = %account.local_id, "account created");
        Ok(account.into_user(PASSWORD_PROVIDER))
    }

    async fn update_profile(
        &self,
        user: &AuthUser,
        profile: &ProfileUpdate,
    ) -> Result<(), ProviderError> {
        let request = UpdateRequest {
            id_token: &user.id_token,
            display_name: profile.display_name.as_deref(),
            return_secure_token: false,
        };
        let _: UpdateResponse = self.call("update", &request).await?;
        Ok(())
    }

    async fn sign_in_with_federated_provider(&self) -> Result<AuthUser, ProviderError> {
        let popup = self.popup.as_ref().ok_or_else(|| {
            ProviderError::new(
                AuthErrorKind::NotConfigured,
                "Google sign-in is not configured",
            )
        })?;
        let access_token = popup.authorize().await?;
        self.sign_in_with_google_token(&access_token).await
    }
}
