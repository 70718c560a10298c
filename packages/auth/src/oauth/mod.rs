//! Google OAuth used by federated sign-up.

mod google;
mod loopback;

pub use google::{AuthorizationRequest, GoogleOAuth};
pub use loopback::{parse_callback, Callback, LoopbackPopup};
