//! Authentication context and hooks for the UI.

use auth::UserInfo;
use dioxus::prelude::*;
use store::{Session, SessionRecord};

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
}

impl AuthState {
    pub fn signed_in(user: UserInfo) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Rebuild the client-safe user from a persisted session.
pub fn user_from_record(record: &SessionRecord) -> UserInfo {
    UserInfo {
        id: record.uid.clone(),
        email: record.email.clone(),
        name: record.display_name.clone(),
        avatar_url: None,
        provider: record.provider.clone(),
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs up or signs out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Get the process-wide session handle.
pub fn use_session() -> Session {
    use_context::<Session>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(session: Session, children: Element) -> Element {
    let restored = session.clone();
    let auth_state = use_signal(move || AuthState {
        user: restored.restore().as_ref().map(user_from_record),
    });

    use_context_provider(|| session);
    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to sign out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    #[props(default)] onlogout: EventHandler,
) -> Element {
    let mut auth_state = use_auth();
    let session = use_session();

    let onclick = move |_| {
        if let Some(record) = session.current() {
            tracing::info!(uid = %record.uid, "signing out");
        }
        if let Err(e) = session.teardown() {
            tracing::warn!("Failed to clear stored session: {}", e);
        }
        auth_state.set(AuthState::default());
        onlogout.call(());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
