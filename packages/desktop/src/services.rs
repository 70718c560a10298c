//! Wiring of the production provider, user directory, and session store.

use auth::{AuthConfig, FirebaseAuth, HttpUserDirectory};
use dioxus::prelude::*;
use store::{FileStore, Session};
use ui::SignupController;

/// Directory name under the platform data dir.
const APP_NAME: &str = "launchpad";

pub type SignupService = SignupController<FirebaseAuth, HttpUserDirectory>;

/// Long-lived services shared by every view.
#[derive(Clone, PartialEq)]
pub struct AppServices {
    pub signup: SignupService,
}

impl AppServices {
    pub fn from_config(config: AuthConfig, store: FileStore) -> Result<Self, String> {
        let directory = HttpUserDirectory::new(config.user_service_url.clone());
        let provider = FirebaseAuth::new(config).map_err(|e| e.to_string())?;
        let session = Session::new(store);
        Ok(Self {
            signup: SignupController::new(provider, directory, session),
        })
    }

    /// Build from environment configuration and the platform data directory.
    pub fn load() -> Result<Self, String> {
        let services = AuthConfig::from_env()
            .map_err(|e| e.to_string())
            .and_then(|config| {
                if config.google.is_none() {
                    tracing::info!("GOOGLE_CLIENT_ID not set, Google sign-up will be unavailable");
                }
                Self::from_config(config, FileStore::platform_default(APP_NAME))
            });
        if let Err(e) = &services {
            tracing::error!("Failed to initialise services: {}", e);
        }
        services
    }

    pub fn session(&self) -> &Session {
        self.signup.session()
    }
}

/// Get the sign-up service provided by the app shell.
pub fn use_signup() -> SignupService {
    use_context::<SignupService>()
}
