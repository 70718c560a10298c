//! Sign-up form state, local validation, and the messages shown for each
//! failure.

use auth::{AuthErrorKind, ProviderError};
use thiserror::Error;

/// Minimum password length accepted locally, in UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Input slot an error message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    General,
    Email,
    Password,
}

/// Why a sign-up attempt did not go through. `Display` is the text shown to
/// the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Invalid Email Address")]
    InvalidEmail,
    #[error("Email is already in use")]
    EmailInUse,
    #[error("Password must be at least 6 characters long")]
    WeakPassword,
    #[error("Something went wrong, contact the developer")]
    Unexpected,
    #[error("Something went wrong with Google Sign-Up, contact the developer")]
    GoogleSignUp,
}

impl SignupError {
    pub fn field(&self) -> Field {
        match self {
            Self::PasswordTooShort | Self::PasswordMismatch | Self::WeakPassword => Field::Password,
            Self::InvalidEmail | Self::EmailInUse => Field::Email,
            Self::Unexpected | Self::GoogleSignUp => Field::General,
        }
    }

    /// Classify a failed email/password provider call.
    pub fn from_provider(err: &ProviderError) -> Self {
        match err.kind {
            AuthErrorKind::InvalidEmail => Self::InvalidEmail,
            AuthErrorKind::EmailAlreadyInUse => Self::EmailInUse,
            AuthErrorKind::WeakPassword => Self::WeakPassword,
            _ => Self::Unexpected,
        }
    }
}

/// Values of the four inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormState {
    /// Check the password fields. Length is checked before equality.
    pub fn validate(&self) -> Result<(), SignupError> {
        if self.password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(SignupError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(SignupError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Error text per slot plus whether an attempt has been made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationState {
    pub general_error: String,
    pub email_error: String,
    pub password_error: String,
    pub submitted: bool,
}

impl ValidationState {
    /// Start a new attempt: all messages cleared, `submitted` set.
    pub fn begin_attempt(&mut self) {
        self.general_error.clear();
        self.email_error.clear();
        self.password_error.clear();
        self.submitted = true;
    }

    /// Start a Google attempt. Field errors and `submitted` are left as they
    /// are; only the general message is reset.
    pub fn begin_federated_attempt(&mut self) {
        self.general_error.clear();
    }

    /// Put the error's message into its slot.
    pub fn record(&mut self, err: &SignupError) {
        let slot = match err.field() {
            Field::General => &mut self.general_error,
            Field::Email => &mut self.email_error,
            Field::Password => &mut self.password_error,
        };
        *slot = err.to_string();
    }

    /// Helper text for the email input; only shown after an attempt.
    pub fn email_helper(&self) -> Option<&str> {
        Self::visible(self.submitted, &self.email_error)
    }

    /// Helper text for the password inputs; only shown after an attempt.
    pub fn password_helper(&self) -> Option<&str> {
        Self::visible(self.submitted, &self.password_error)
    }

    pub fn general(&self) -> Option<&str> {
        Self::visible(true, &self.general_error)
    }

    fn visible(submitted: bool, text: &str) -> Option<&str> {
        (submitted && !text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str) -> FormState {
        FormState {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_short_passwords_rejected() {
        for password in ["", "a", "abc", "12345"] {
            assert_eq!(
                form(password, password).validate(),
                Err(SignupError::PasswordTooShort)
            );
        }
    }

    #[test]
    fn test_length_checked_before_mismatch() {
        assert_eq!(form("abc", "xyz").validate(), Err(SignupError::PasswordTooShort));
    }

    #[test]
    fn test_mismatch_rejected() {
        for (password, confirm) in [("123456", "1234567"), ("secret!", "Secret!"), ("hunter22", "")] {
            assert_eq!(
                form(password, confirm).validate(),
                Err(SignupError::PasswordMismatch)
            );
        }
    }

    #[test]
    fn test_valid_passwords() {
        assert_eq!(form("123456", "123456").validate(), Ok(()));
        // Counted in UTF-16 code units, not bytes or chars.
        assert_eq!(form("äöüßéè", "äöüßéè").validate(), Ok(()));
        assert_eq!(form("äöü", "äöü").validate(), Err(SignupError::PasswordTooShort));
        assert_eq!(form("😀😀😀", "😀😀😀").validate(), Ok(()));
        assert_eq!(form("😀😀", "😀😀").validate(), Err(SignupError::PasswordTooShort));
        assert_eq!(form("😀abcd", "😀abcd").validate(), Ok(()));
    }

    #[test]
    fn test_messages_and_slots() {
        assert_eq!(
            SignupError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters long"
        );
        assert_eq!(SignupError::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(SignupError::InvalidEmail.field(), Field::Email);
        assert_eq!(SignupError::EmailInUse.field(), Field::Email);
        assert_eq!(SignupError::WeakPassword.field(), Field::Password);
        assert_eq!(SignupError::GoogleSignUp.field(), Field::General);
    }

    #[test]
    fn test_provider_kinds_map_to_four_outcomes() {
        let map = |kind| SignupError::from_provider(&ProviderError::new(kind, "x"));
        assert_eq!(map(AuthErrorKind::InvalidEmail), SignupError::InvalidEmail);
        assert_eq!(map(AuthErrorKind::EmailAlreadyInUse), SignupError::EmailInUse);
        assert_eq!(map(AuthErrorKind::WeakPassword), SignupError::WeakPassword);
        assert_eq!(map(AuthErrorKind::Transport), SignupError::Unexpected);
        assert_eq!(map(AuthErrorKind::Other), SignupError::Unexpected);
    }

    #[test]
    fn test_begin_attempt_clears_every_slot() {
        let mut state = ValidationState::default();
        state.begin_attempt();
        state.record(&SignupError::EmailInUse);
        state.record(&SignupError::PasswordMismatch);
        state.record(&SignupError::Unexpected);
        assert_eq!(state.email_helper(), Some("Email is already in use"));

        state.begin_attempt();

        assert!(state.submitted);
        assert!(state.general_error.is_empty());
        assert!(state.email_error.is_empty());
        assert!(state.password_error.is_empty());
        assert!(state.email_helper().is_none());
    }

    #[test]
    fn test_federated_attempt_keeps_field_errors() {
        let mut state = ValidationState::default();
        state.begin_attempt();
        state.record(&SignupError::InvalidEmail);
        state.record(&SignupError::PasswordMismatch);
        state.record(&SignupError::GoogleSignUp);

        state.begin_federated_attempt();

        assert!(state.general().is_none());
        assert_eq!(state.email_helper(), Some("Invalid Email Address"));
        assert_eq!(state.password_helper(), Some("Passwords do not match"));
        assert!(state.submitted);
    }

    #[test]
    fn test_federated_attempt_before_any_submit() {
        let mut state = ValidationState::default();
        state.begin_federated_attempt();
        assert!(!state.submitted);

        state.record(&SignupError::GoogleSignUp);
        assert_eq!(
            state.general(),
            Some("Something went wrong with Google Sign-Up, contact the developer")
        );
    }

    #[test]
    fn test_helpers_hidden_before_first_attempt() {
        let mut state = ValidationState::default();
        state.email_error = "Invalid Email Address".to_string();
        assert!(state.email_helper().is_none());

        state.submitted = true;
        assert_eq!(state.email_helper(), Some("Invalid Email Address"));
    }
}
