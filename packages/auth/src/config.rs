//! Provider configuration from environment variables.
//!
//! | Variable | Required | Purpose |
//! |----------|----------|---------|
//! | `FIREBASE_API_KEY` | yes | Web API key of the Firebase project |
//! | `USER_SERVICE_URL` | no | Base URL of the user-record service (default `http://localhost:8080`) |
//! | `FIREBASE_AUTH_EMULATOR_HOST` | no | `host:port` of a local Auth emulator |
//! | `GOOGLE_CLIENT_ID` | no | OAuth client for Google sign-up; disabled when unset |
//! | `GOOGLE_CLIENT_SECRET` | no | Secret of the installed-app OAuth client |

use oauth2::{AuthUrl, ClientId, ClientSecret, TokenUrl};

use crate::error::ConfigError;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_USER_SERVICE_URL: &str = "http://localhost:8080";

/// Everything needed to talk to Firebase Auth and the user-record service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub api_key: String,
    /// Identity Toolkit base URL, without the `/v1` suffix.
    pub identity_toolkit_url: String,
    pub user_service_url: String,
    pub google: Option<GoogleConfig>,
}

/// Google OAuth client configuration.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: ClientId,
    pub client_secret: Option<ClientSecret>,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
}

impl AuthConfig {
    /// Config against production Firebase with no Google client.
    pub fn new(api_key: impl Into<String>, user_service_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            identity_toolkit_url: IDENTITY_TOOLKIT_URL.to_string(),
            user_service_url: user_service_url.into(),
            google: None,
        }
    }

    /// Builder method to point at a different Identity Toolkit host.
    pub fn with_identity_toolkit_url(mut self, url: impl Into<String>) -> Self {
        self.identity_toolkit_url = url.into();
        self
    }

    /// Builder method to enable Google sign-up.
    pub fn with_google(mut self, google: GoogleConfig) -> Self {
        self.google = Some(google);
        self
    }

    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var("FIREBASE_API_KEY").ok_or(ConfigError::Missing("FIREBASE_API_KEY"))?;
        let user_service_url = var("USER_SERVICE_URL")
            .unwrap_or_else(|| DEFAULT_USER_SERVICE_URL.to_string());

        let mut config = Self::new(api_key, user_service_url.trim_end_matches('/'));

        if let Some(host) = var("FIREBASE_AUTH_EMULATOR_HOST") {
            config = config
                .with_identity_toolkit_url(format!("http://{host}/identitytoolkit.googleapis.com"));
        }

        if let Some(client_id) = var("GOOGLE_CLIENT_ID") {
            let client_secret = var("GOOGLE_CLIENT_SECRET").map(ClientSecret::new);
            config = config.with_google(GoogleConfig::new(client_id, client_secret)?);
        }

        Ok(config)
    }
}

impl GoogleConfig {
    /// Google's endpoints for the given client.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: Option<ClientSecret>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: ClientId::new(client_id.into()),
            client_secret,
            auth_url: AuthUrl::new("https://accounts.google.com/o/oauth2/v2/auth".to_string())
                .map_err(|e| ConfigError::InvalidUrl {
                    name: "auth_url",
                    reason: e.to_string(),
                })?,
            token_url: TokenUrl::new("https://oauth2.googleapis.com/token".to_string())
                .map_err(|e| ConfigError::InvalidUrl {
                    name: "token_url",
                    reason: e.to_string(),
                })?,
        })
    }
}
