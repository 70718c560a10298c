//! # Loopback "popup" for Google sign-in
//!
//! Desktop apps cannot open a provider popup the way a browser tab can, so the
//! consent page is shown in the system browser and the redirect is caught on a
//! one-shot HTTP listener bound to `127.0.0.1` on a random port.
//!
//! 1. Bind the listener, derive `http://127.0.0.1:<port>/callback`.
//! 2. Open the consent URL with [`open::that`].
//! 3. Accept a single request, answer it with a small HTML page, and parse
//!    `code` / `state` (or `error`) from its request line.
//! 4. Check `state` against the CSRF token and exchange the code.
//!
//! All four steps share one deadline, so a client that connects and never
//! sends anything cannot hold the flow open.

use std::time::Duration;

use oauth2::url::Url;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use super::google::GoogleOAuth;
use crate::error::{AuthErrorKind, ProviderError};

/// How long to wait for the browser to come back. Mirrors the lifetime of an
/// OAuth state on the server side.
const CONSENT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Longest request line read from the redirect.
const MAX_REQUEST_LINE: u64 = 8192;

/// Opens a URL for the user. The default is the system browser.
pub type Launcher = fn(&str) -> std::io::Result<()>;

fn system_browser(url: &str) -> std::io::Result<()> {
    open::that(url)
}

const DONE_PAGE: &str = "<!doctype html><html><body style=\"font-family:sans-serif\">\
<p>Sign-in complete. You can close this window and return to Launchpad.</p></body></html>";

/// Query parameters delivered to the loopback redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct Callback {
    pub code: String,
    pub state: String,
}

/// Runs the Google consent flow through the system browser.
#[derive(Debug, Clone)]
pub struct LoopbackPopup {
    google: GoogleOAuth,
    timeout: Duration,
    launcher: Launcher,
}

impl LoopbackPopup {
    pub fn new(google: GoogleOAuth) -> Self {
        Self {
            google,
            timeout: CONSENT_TIMEOUT,
            launcher: system_browser,
        }
    }

    /// Builder method to change how long to wait for the redirect.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method to open the consent page some other way.
    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    /// Show the consent page and return a Google access token.
    pub async fn authorize(&self) -> Result<String, ProviderError> {
        tokio::time::timeout(self.timeout, self.run_flow())
            .await
            .map_err(|_| {
                ProviderError::new(AuthErrorKind::PopupClosed, "Timed out waiting for Google sign-in")
            })?
    }

    async fn run_flow(&self) -> Result<String, ProviderError> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let port = listener.local_addr()?.port();
        let redirect_uri = format!("http://127.0.0.1:{port}/callback");

        let request = self.google.authorize_url(&redirect_uri)?;
        tracing::debug!(%redirect_uri, "opening Google consent page");
        (self.launcher)(&request.url).map_err(|e| {
            ProviderError::new(
                AuthErrorKind::Other,
                format!("Failed to open browser: {}", e),
            )
        })?;

        let (mut stream, _) = listener.accept().await?;

        let mut request_line = String::new();
        BufReader::new((&mut stream).take(MAX_REQUEST_LINE))
            .read_line(&mut request_line)
            .await?;

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            DONE_PAGE.len(),
            DONE_PAGE
        );
        if let Err(e) = stream.write_all(response.as_bytes()).await {
            tracing::debug!("Failed to answer loopback redirect: {}", e);
        }

        let callback = parse_callback(&request_line)?;
        if callback.state != *request.csrf_state.secret() {
            return Err(ProviderError::new(
                AuthErrorKind::Other,
                "OAuth state mismatch",
            ));
        }

        self.google
            .exchange_code(&callback.code, request.pkce_verifier, &redirect_uri)
            .await
    }
}

/// Parse an HTTP request line such as
/// `GET /callback?code=...&state=... HTTP/1.1`.
pub fn parse_callback(request_line: &str) -> Result<Callback, ProviderError> {
    let malformed = || ProviderError::new(AuthErrorKind::Other, "Malformed OAuth redirect");

    let target = request_line.split_whitespace().nth(1).ok_or_else(malformed)?;
    let url = Url::parse(&format!("http://127.0.0.1{target}")).map_err(|_| malformed())?;

    let mut code = None;
    let mut state = None;
    for (key, value) in url.query_pairs() {
        match &*key {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => return Err(ProviderError::from_code(&value)),
            _ => {}
        }
    }

    match (code, state) {
        (Some(code), Some(state)) => Ok(Callback { code, state }),
        _ => Err(malformed()),
    }
}
