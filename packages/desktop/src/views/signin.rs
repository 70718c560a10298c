use dioxus::prelude::*;

use crate::Route;

/// Sign-in page. Only links back to sign-up for now.
#[component]
pub fn Signin() -> Element {
    rsx! {
        div {
            class: "page",

            div {
                class: "card",
                h1 { class: "card-title", "Sign In" }
                p { class: "subtitle", "Signing in with an existing account is not available yet." }
                p {
                    class: "footnote",
                    "Don't have an account? "
                    Link { class: "link", to: Route::Signup {}, "Sign Up" }
                }
            }
        }
    }
}
