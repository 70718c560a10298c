//! Sign-up form logic shared by the app views.

mod controller;
mod form;

pub use controller::{Destination, SignupController, SignupOutcome};
pub use form::{Field, FormState, SignupError, ValidationState, MIN_PASSWORD_LEN};
