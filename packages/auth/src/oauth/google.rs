//! # Google OAuth 2.0 client
//!
//! Implements the Google Authorization Code flow with PKCE for an installed
//! application. The result is a Google access token, which
//! [`FirebaseAuth`](crate::FirebaseAuth) trades for a Firebase user via
//! `accounts:signInWithIdp`.
//!
//! ## Flow
//!
//! 1. **[`authorize_url`](GoogleOAuth::authorize_url)**: builds the consent URL
//!    requesting `openid`, `email`, and `profile` scopes with a random PKCE
//!    challenge. Returns the CSRF state and verifier for the caller to hold
//!    until the redirect comes back.
//!
//! 2. **[`exchange_code`](GoogleOAuth::exchange_code)**: exchanges the
//!    authorization code + PKCE verifier for an access token.
//!
//! The redirect URI is chosen per flow because the loopback port is only known
//! once the listener is bound.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, RedirectUrl, Scope, TokenResponse,
};

use crate::config::GoogleConfig;
use crate::error::{AuthErrorKind, ProviderError};

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Consent URL plus the secrets needed to finish the flow.
pub struct AuthorizationRequest {
    pub url: String,
    pub csrf_state: CsrfToken,
    pub pkce_verifier: PkceCodeVerifier,
}

/// Google OAuth handler.
#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    config: GoogleConfig,
    http: reqwest::Client,
}

impl GoogleOAuth {
    /// Create a new Google OAuth handler.
    pub fn new(config: GoogleConfig) -> Result<Self, ProviderError> {
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { config, http })
    }

    fn create_client(&self, redirect_uri: &str) -> Result<ConfiguredClient, ProviderError> {
        let redirect_url = RedirectUrl::new(redirect_uri.to_string())
            .map_err(|e| ProviderError::new(AuthErrorKind::Other, e.to_string()))?;

        let mut client = BasicClient::new(self.config.client_id.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(redirect_url);
        if let Some(secret) = &self.config.client_secret {
            client = client.set_client_secret(secret.clone());
        }
        Ok(client)
    }

    /// Generate authorization URL with PKCE.
    pub fn authorize_url(&self, redirect_uri: &str) -> Result<AuthorizationRequest, ProviderError> {
        let client = self.create_client(redirect_uri)?;
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .add_extra_param("prompt", "select_account")
            .set_pkce_challenge(pkce_challenge)
            .url();

        Ok(AuthorizationRequest {
            url: auth_url.to_string(),
            csrf_state,
            pkce_verifier,
        })
    }

    /// Exchange authorization code for an access token.
    pub async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: PkceCodeVerifier,
        redirect_uri: &str,
    ) -> Result<String, ProviderError> {
        let client = self.create_client(redirect_uri)?;

        let token_result = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(pkce_verifier)
            .request_async(&self.http)
            .await
            .map_err(|e| {
                ProviderError::new(AuthErrorKind::Other, format!("Token exchange failed: {}", e))
            })?;

        Ok(token_result.access_token().secret().clone())
    }
}
