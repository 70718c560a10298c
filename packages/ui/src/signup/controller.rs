//! # Sign-up controller
//!
//! [`SignupController`] runs the two sign-up protocols against an
//! [`IdentityProvider`] and a [`UserDirectory`], and starts the process-wide
//! [`Session`] on success. It holds no UI state: the view owns the
//! [`FormState`] and [`ValidationState`] and applies the returned
//! [`SignupOutcome`].
//!
//! ## Email + password
//!
//! 1. Local validation ([`FormState::validate`]); stop on failure.
//! 2. `create_account`, then `update_profile` with the entered name.
//! 3. Register the user record, start the session, go to the dashboard.
//!
//! ## Google
//!
//! 1. `sign_in_with_federated_provider`; no local validation.
//! 2. `update_profile` with the entered name, when one was entered.
//! 3. Same completion as above.
//!
//! Only one submission runs at a time. A trigger that arrives while another is
//! in flight returns [`SignupOutcome::Busy`] without calling anything.
//!
//! Failures of the user-record service or of session storage happen after the
//! provider already created the account. They are logged and do not change the
//! outcome.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use auth::{AuthUser, IdentityProvider, ProfileUpdate, UserDirectory, UserInfo};
use store::{Session, SessionRecord};

use super::form::{FormState, SignupError, ValidationState};

/// Where the view should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Dashboard,
}

/// Result of one sign-up trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    SignedUp(UserInfo),
    Rejected(SignupError),
    /// Another submission was still in flight.
    Busy,
}

impl SignupOutcome {
    pub fn destination(&self) -> Option<Destination> {
        match self {
            Self::SignedUp(_) => Some(Destination::Dashboard),
            _ => None,
        }
    }

    /// Whether this outcome ends the attempt that produced it. A `Busy`
    /// answer leaves the running submission in charge of the view.
    pub fn settles(&self) -> bool {
        !matches!(self, Self::Busy)
    }

    /// Apply to the validation state of the attempt that produced this outcome.
    pub fn apply(&self, validation: &mut ValidationState) {
        if let Self::Rejected(err) = self {
            validation.record(err);
        }
    }
}

struct Inner<P, D> {
    provider: P,
    directory: D,
    session: Session,
    in_flight: AtomicBool,
}

/// Runs sign-up submissions. Clones share the provider, the session, and the
/// in-flight flag.
pub struct SignupController<P, D> {
    inner: Arc<Inner<P, D>>,
}

impl<P, D> Clone for SignupController<P, D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P, D> PartialEq for SignupController<P, D> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<P: IdentityProvider, D: UserDirectory> SignupController<P, D> {
    pub fn new(provider: P, directory: D, session: Session) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                directory,
                session,
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        self.inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.inner.in_flight))
    }

    /// Email + password sign-up.
    pub async fn submit(&self, form: &FormState) -> SignupOutcome {
        let Some(_guard) = self.begin() else {
            return SignupOutcome::Busy;
        };
        match self.sign_up_with_password(form).await {
            Ok(user) => SignupOutcome::SignedUp(user),
            Err(err) => SignupOutcome::Rejected(err),
        }
    }

    /// Google sign-up. `name` replaces the Google display name when non-empty.
    pub async fn submit_federated(&self, name: &str) -> SignupOutcome {
        let Some(_guard) = self.begin() else {
            return SignupOutcome::Busy;
        };
        match self.sign_up_with_google(name).await {
            Ok(user) => SignupOutcome::SignedUp(user),
            Err(err) => SignupOutcome::Rejected(err),
        }
    }

    async fn sign_up_with_password(&self, form: &FormState) -> Result<UserInfo, SignupError> {
        form.validate()?;

        let provider = &self.inner.provider;
        let mut user = provider
            .create_account(&form.email, &form.password)
            .await
            .map_err(|e| {
                tracing::error!("Error signing up: {}", e);
                SignupError::from_provider(&e)
            })?;

        provider
            .update_profile(&user, &ProfileUpdate::display_name(form.name.as_str()))
            .await
            .map_err(|e| {
                tracing::error!(uid = %user.uid, "Error setting display name: {}", e);
                SignupError::from_provider(&e)
            })?;
        user.display_name = Some(form.name.clone());

        Ok(self.complete(user).await)
    }

    async fn sign_up_with_google(&self, name: &str) -> Result<UserInfo, SignupError> {
        let provider = &self.inner.provider;
        let mut user = provider
            .sign_in_with_federated_provider()
            .await
            .map_err(|e| {
                tracing::error!("Error signing up with Google: {}", e);
                SignupError::GoogleSignUp
            })?;

        if !name.trim().is_empty() {
            provider
                .update_profile(&user, &ProfileUpdate::display_name(name))
                .await
                .map_err(|e| {
                    tracing::error!("Error signing up with Google: {}", e);
                    SignupError::GoogleSignUp
                })?;
            user.display_name = Some(name.to_string());
        }

        Ok(self.complete(user).await)
    }

    /// Post-authentication side effects. None of them can fail the sign-up.
    async fn complete(&self, user: AuthUser) -> UserInfo {
        if let Err(e) = self.inner.directory.register_user(&user).await {
            tracing::warn!(uid = %user.uid, "Failed to store user record: {}", e);
        }

        let record = SessionRecord::signed_in(
            user.uid.clone(),
            user.email.clone(),
            user.provider_id.clone(),
        )
        .with_display_name(user.display_name.clone());
        if let Err(e) = self.inner.session.init(record) {
            tracing::warn!(uid = %user.uid, "Failed to persist session: {}", e);
        }

        tracing::info!(uid = %user.uid, provider = %user.provider_id, "signed up");
        user.to_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{AuthErrorKind, DirectoryError, ProviderError};
    use auth::models::{GOOGLE_PROVIDER, PASSWORD_PROVIDER};
    use std::sync::Mutex;
    use store::{MemoryStore, SessionStore};
    use tokio::sync::Notify;

    fn auth_user(provider_id: &str) -> AuthUser {
        AuthUser {
            uid: "uid-1".to_string(),
            email: "ada@example.com".to_string(),
            display_name: None,
            photo_url: None,
            provider_id: provider_id.to_string(),
            id_token: "token".to_string(),
        }
    }

    /// Identity provider that records calls and answers from a script.
    #[derive(Clone, Default)]
    struct StubProvider {
        calls: Arc<Mutex<Vec<String>>>,
        create_error: Option<AuthErrorKind>,
        update_error: Option<AuthErrorKind>,
        federated_error: Option<AuthErrorKind>,
        gate: Option<Arc<Notify>>,
    }

    impl StubProvider {
        fn failing_create(kind: AuthErrorKind) -> Self {
            Self {
                create_error: Some(kind),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl IdentityProvider for StubProvider {
        async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, ProviderError> {
            self.log(format!("create_account({email}, {password})"));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match self.create_error {
                Some(kind) => Err(ProviderError::new(kind, "scripted")),
                None => Ok(auth_user(PASSWORD_PROVIDER)),
            }
        }

        async fn update_profile(
            &self,
            user: &AuthUser,
            profile: &ProfileUpdate,
        ) -> Result<(), ProviderError> {
            self.log(format!(
                "update_profile({}, {})",
                user.uid,
                profile.display_name.as_deref().unwrap_or_default()
            ));
            match self.update_error {
                Some(kind) => Err(ProviderError::new(kind, "scripted")),
                None => Ok(()),
            }
        }

        async fn sign_in_with_federated_provider(&self) -> Result<AuthUser, ProviderError> {
            self.log("sign_in_with_federated_provider".to_string());
            match self.federated_error {
                Some(kind) => Err(ProviderError::new(kind, "EMAIL_EXISTS")),
                None => {
                    let mut user = auth_user(GOOGLE_PROVIDER);
                    user.display_name = Some("Google Name".to_string());
                    Ok(user)
                }
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingDirectory {
        registered: Arc<Mutex<Vec<AuthUser>>>,
        reject: bool,
    }

    impl UserDirectory for RecordingDirectory {
        async fn register_user(&self, user: &AuthUser) -> Result<(), DirectoryError> {
            self.registered.lock().unwrap().push(user.clone());
            if self.reject {
                return Err(DirectoryError::Rejected { status: 500 });
            }
            Ok(())
        }
    }

    struct Harness {
        provider: StubProvider,
        directory: RecordingDirectory,
        store: MemoryStore,
        controller: SignupController<StubProvider, RecordingDirectory>,
    }

    fn harness(provider: StubProvider) -> Harness {
        harness_with(provider, RecordingDirectory::default())
    }

    fn harness_with(provider: StubProvider, directory: RecordingDirectory) -> Harness {
        let store = MemoryStore::new();
        let controller = SignupController::new(
            provider.clone(),
            directory.clone(),
            Session::new(store.clone()),
        );
        Harness {
            provider,
            directory,
            store,
            controller,
        }
    }

    fn form(password: &str, confirm: &str) -> FormState {
        FormState {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_short_password_never_reaches_provider() {
        let h = harness(StubProvider::default());

        let outcome = h.controller.submit(&form("abc", "abc")).await;

        assert_eq!(outcome, SignupOutcome::Rejected(SignupError::PasswordTooShort));
        assert!(h.provider.calls().is_empty());
        assert!(h.store.load().is_none());
    }

    #[tokio::test]
    async fn test_mismatch_never_reaches_provider() {
        let h = harness(StubProvider::default());

        let outcome = h.controller.submit(&form("hunter22", "hunter23")).await;

        assert_eq!(outcome, SignupOutcome::Rejected(SignupError::PasswordMismatch));
        assert!(h.provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_sign_up() {
        let h = harness(StubProvider::default());

        let outcome = h.controller.submit(&form("hunter22", "hunter22")).await;

        assert_eq!(outcome.destination(), Some(Destination::Dashboard));
        let SignupOutcome::SignedUp(info) = outcome else {
            panic!("expected sign-up to succeed");
        };
        assert_eq!(info.display_name(), "Ada");

        assert_eq!(
            h.provider.calls(),
            vec![
                "create_account(ada@example.com, hunter22)".to_string(),
                "update_profile(uid-1, Ada)".to_string(),
            ]
        );

        let registered = h.directory.registered.lock().unwrap();
        assert_eq!(registered.len(), 1);
        assert_eq!(registered[0].display_name.as_deref(), Some("Ada"));

        let saved = h.store.load().unwrap();
        assert!(saved.logged_in);
        assert_eq!(saved.uid, "uid-1");
        assert_eq!(saved.display_name.as_deref(), Some("Ada"));
        assert!(h.controller.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_email_in_use() {
        let h = harness(StubProvider::failing_create(AuthErrorKind::EmailAlreadyInUse));

        let outcome = h.controller.submit(&form("hunter22", "hunter22")).await;

        assert_eq!(outcome.destination(), None);
        let mut validation = ValidationState::default();
        validation.begin_attempt();
        outcome.apply(&mut validation);
        assert_eq!(validation.email_error, "Email is already in use");
        assert!(validation.password_error.is_empty());
        assert!(validation.general_error.is_empty());
        assert!(!h.controller.session().is_logged_in());
        assert!(h.directory.registered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let h = harness(StubProvider::failing_create(AuthErrorKind::InvalidEmail));

        let outcome = h.controller.submit(&form("hunter22", "hunter22")).await;

        let mut validation = ValidationState::default();
        outcome.apply(&mut validation);
        assert_eq!(validation.email_error, "Invalid Email Address");
    }

    #[tokio::test]
    async fn test_weak_password_from_provider() {
        let h = harness(StubProvider::failing_create(AuthErrorKind::WeakPassword));

        let outcome = h.controller.submit(&form("hunter22", "hunter22")).await;

        let mut validation = ValidationState::default();
        outcome.apply(&mut validation);
        assert_eq!(
            validation.password_error,
            "Password must be at least 6 characters long"
        );
    }

    #[tokio::test]
    async fn test_unclassified_provider_error() {
        for kind in [AuthErrorKind::Other, AuthErrorKind::Transport] {
            let h = harness(StubProvider::failing_create(kind));

            let outcome = h.controller.submit(&form("hunter22", "hunter22")).await;

            let mut validation = ValidationState::default();
            outcome.apply(&mut validation);
            assert_eq!(
                validation.general_error,
                "Something went wrong, contact the developer"
            );
        }
    }

    #[tokio::test]
    async fn test_profile_update_failure_is_reported() {
        let h = harness(StubProvider {
            update_error: Some(AuthErrorKind::Transport),
            ..StubProvider::default()
        });

        let outcome = h.controller.submit(&form("hunter22", "hunter22")).await;

        assert_eq!(outcome, SignupOutcome::Rejected(SignupError::Unexpected));
        assert!(!h.controller.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_directory_failure_does_not_block_sign_up() {
        let directory = RecordingDirectory {
            reject: true,
            ..RecordingDirectory::default()
        };
        let h = harness_with(StubProvider::default(), directory);

        let outcome = h.controller.submit(&form("hunter22", "hunter22")).await;

        assert_eq!(outcome.destination(), Some(Destination::Dashboard));
        assert!(h.store.load().unwrap().logged_in);
    }

    #[tokio::test]
    async fn test_google_sign_up() {
        let h = harness(StubProvider::default());

        let outcome = h.controller.submit_federated("Ada").await;

        assert_eq!(outcome.destination(), Some(Destination::Dashboard));
        assert_eq!(
            h.provider.calls(),
            vec![
                "sign_in_with_federated_provider".to_string(),
                "update_profile(uid-1, Ada)".to_string(),
            ]
        );
        let saved = h.store.load().unwrap();
        assert_eq!(saved.provider, GOOGLE_PROVIDER);
        assert_eq!(saved.display_name.as_deref(), Some("Ada"));
        assert_eq!(h.directory.registered.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_google_sign_up_keeps_google_name_when_none_entered() {
        let h = harness(StubProvider::default());

        let outcome = h.controller.submit_federated("  ").await;

        let SignupOutcome::SignedUp(info) = outcome else {
            panic!("expected sign-up to succeed");
        };
        assert_eq!(info.display_name(), "Google Name");
        assert_eq!(h.provider.calls(), vec!["sign_in_with_federated_provider".to_string()]);
    }

    #[tokio::test]
    async fn test_google_failure_is_never_classified() {
        for kind in [
            AuthErrorKind::EmailAlreadyInUse,
            AuthErrorKind::InvalidEmail,
            AuthErrorKind::PopupClosed,
            AuthErrorKind::NotConfigured,
        ] {
            let h = harness(StubProvider {
                federated_error: Some(kind),
                ..StubProvider::default()
            });

            let outcome = h.controller.submit_federated("Ada").await;

            let mut validation = ValidationState::default();
            outcome.apply(&mut validation);
            assert_eq!(
                validation.general_error,
                "Something went wrong with Google Sign-Up, contact the developer"
            );
            assert!(validation.email_error.is_empty());
        }
    }

    #[tokio::test]
    async fn test_resubmit_after_error_starts_clean() {
        let h = harness(StubProvider::failing_create(AuthErrorKind::EmailAlreadyInUse));
        let mut validation = ValidationState::default();

        validation.begin_attempt();
        h.controller.submit(&form("hunter22", "hunter22")).await.apply(&mut validation);
        assert_eq!(validation.email_error, "Email is already in use");

        validation.begin_attempt();
        h.controller.submit(&form("abc", "abc")).await.apply(&mut validation);
        assert!(validation.email_error.is_empty());
        assert!(validation.general_error.is_empty());
        assert_eq!(
            validation.password_error,
            "Password must be at least 6 characters long"
        );
    }

    #[tokio::test]
    async fn test_second_trigger_while_in_flight_is_ignored() {
        let gate = Arc::new(Notify::new());
        let h = harness(StubProvider {
            gate: Some(gate.clone()),
            ..StubProvider::default()
        });
        let valid = form("hunter22", "hunter22");

        let (first, second) = tokio::join!(h.controller.submit(&valid), async {
            assert!(h.controller.is_submitting());
            let second = h.controller.submit(&valid).await;
            let federated = h.controller.submit_federated("Ada").await;
            gate.notify_one();
            (second, federated)
        });

        assert_eq!(first.destination(), Some(Destination::Dashboard));
        assert!(first.settles());
        assert_eq!(second, (SignupOutcome::Busy, SignupOutcome::Busy));
        assert!(!second.0.settles());
        assert_eq!(second.0.destination(), None);
        assert_eq!(h.provider.calls().len(), 2);
        assert!(!h.controller.is_submitting());
    }

    #[tokio::test]
    async fn test_flag_released_after_rejection() {
        let h = harness(StubProvider::default());

        h.controller.submit(&form("abc", "abc")).await;
        assert!(!h.controller.is_submitting());

        let outcome = h.controller.submit(&form("hunter22", "hunter22")).await;
        assert_eq!(outcome.destination(), Some(Destination::Dashboard));
    }

    #[test]
    fn test_busy_leaves_the_running_attempt_alone() {
        let mut validation = ValidationState::default();
        validation.begin_attempt();
        validation.record(&SignupError::EmailInUse);
        let before = validation.clone();

        SignupOutcome::Busy.apply(&mut validation);

        assert!(!SignupOutcome::Busy.settles());
        assert_eq!(validation, before);
        assert!(SignupOutcome::Rejected(SignupError::Unexpected).settles());
    }
}
