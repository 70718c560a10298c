//! Sign-up page view for desktop with email/password and Google buttons.

use dioxus::prelude::*;
use dioxus::router::Navigator;
use ui::{use_auth, AuthState, FormState, SignupOutcome, ValidationState};

use crate::services::use_signup;
use crate::Route;

/// Sign-up page component for desktop.
#[component]
pub fn Signup() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let signup = use_signup();
    let google_signup = signup.clone();
    let mut form = use_signal(FormState::default);
    let mut validation = use_signal(ValidationState::default);
    let mut submitting = use_signal(|| false);

    // If already signed in, go straight to the dashboard
    if auth().is_logged_in() {
        nav.replace(Route::Dashboard {});
    }

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() || signup.is_submitting() {
            return;
        }
        submitting.set(true);
        validation.write().begin_attempt();
        let signup = signup.clone();
        spawn(async move {
            let outcome = signup.submit(&form()).await;
            finish(outcome, submitting, auth, validation, nav);
        });
    };

    let handle_google = move |_: MouseEvent| {
        if submitting() || google_signup.is_submitting() {
            return;
        }
        submitting.set(true);
        validation.write().begin_federated_attempt();
        let signup = google_signup.clone();
        spawn(async move {
            let name = form.read().name.clone();
            let outcome = signup.submit_federated(&name).await;
            finish(outcome, submitting, auth, validation, nav);
        });
    };

    let values = form();
    let state = validation();
    let email_class = if state.email_helper().is_some() { "input input-error" } else { "input" };
    let password_class = if state.password_helper().is_some() { "input input-error" } else { "input" };

    rsx! {
        div {
            class: "page",

            div {
                class: "card",

                div {
                    class: "card-header",
                    button {
                        class: "back-button",
                        r#type: "button",
                        title: "Back",
                        onclick: move |_| {
                            nav.push(Route::Home {});
                        },
                        "←"
                    }
                    h1 { class: "card-title", "Sign Up" }
                }

                form {
                    class: "form",
                    novalidate: true,
                    onsubmit: handle_submit,

                    input {
                        class: "input",
                        id: "name",
                        name: "name",
                        r#type: "text",
                        placeholder: "Name",
                        autocomplete: "name",
                        autofocus: true,
                        required: true,
                        value: "{values.name}",
                        oninput: move |evt: FormEvent| form.write().name = evt.value(),
                    }

                    input {
                        class: email_class,
                        id: "email",
                        name: "email",
                        r#type: "email",
                        placeholder: "Email Address",
                        autocomplete: "email",
                        required: true,
                        value: "{values.email}",
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                    if let Some(message) = state.email_helper() {
                        p { class: "helper-text", "{message}" }
                    }

                    input {
                        class: password_class,
                        id: "password",
                        name: "password",
                        r#type: "password",
                        placeholder: "Password",
                        autocomplete: "new-password",
                        required: true,
                        value: "{values.password}",
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }

                    input {
                        class: password_class,
                        id: "confirmPassword",
                        name: "confirmPassword",
                        r#type: "password",
                        placeholder: "Confirm Password",
                        autocomplete: "new-password",
                        required: true,
                        value: "{values.confirm_password}",
                        oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                    }
                    if let Some(message) = state.password_helper() {
                        p { class: "helper-text", "{message}" }
                    }

                    if let Some(message) = state.general() {
                        p { class: "error-text", "{message}" }
                    }

                    button {
                        class: "button button-primary",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Signing up..." } else { "Sign Up" }
                    }

                    button {
                        class: "button button-outline",
                        r#type: "button",
                        disabled: submitting(),
                        onclick: handle_google,
                        "Sign Up with Google"
                    }

                    p {
                        class: "footnote",
                        "Already have an account? "
                        Link { class: "link", to: Route::Signin {}, "Sign In" }
                    }
                }
            }
        }
    }
}

/// Apply a finished submission to the view. `Busy` belongs to a submission
/// that is still running, so it changes nothing.
fn finish(
    outcome: SignupOutcome,
    mut submitting: Signal<bool>,
    mut auth: Signal<AuthState>,
    mut validation: Signal<ValidationState>,
    nav: Navigator,
) {
    if !outcome.settles() {
        return;
    }
    submitting.set(false);
    if let SignupOutcome::SignedUp(user) = &outcome {
        auth.set(AuthState::signed_in(user.clone()));
    }
    outcome.apply(&mut validation.write());
    if let Some(destination) = outcome.destination() {
        nav.replace(Route::from(destination));
    }
}
