//! This crate contains all shared UI logic for the workspace.

mod context;
pub use context::{use_auth, use_session, user_from_record, AuthProvider, AuthState, LogoutButton};

pub mod signup;
pub use signup::{
    Destination, FormState, SignupController, SignupError, SignupOutcome, ValidationState,
};
