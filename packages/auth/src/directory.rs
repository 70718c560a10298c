//! HTTP client for the application's user-record service.

use crate::error::DirectoryError;
use crate::models::{AuthUser, NewUserRecord};
use crate::provider::UserDirectory;

/// Posts new users to `{base_url}/api/users`.
///
/// The provider's id token goes along as a bearer credential so the service
/// can verify the uid it is asked to store.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    base_url: String,
    http: reqwest::Client,
}

impl HttpUserDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }
}

impl UserDirectory for HttpUserDirectory {
    async fn register_user(&self, user: &AuthUser) -> Result<(), DirectoryError> {
        let record = NewUserRecord::from(user);
        let response = self
            .http
            .post(format!("{}/api/users", self.base_url))
            .bearer_auth(&user.id_token)
            .json(&record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
