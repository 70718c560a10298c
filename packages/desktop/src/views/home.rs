use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

/// Landing page with entry points into the app.
#[component]
pub fn Home() -> Element {
    let auth = use_auth();

    rsx! {
        div {
            class: "page",

            div {
                class: "card",
                h1 { class: "card-title", "Launchpad" }
                p { class: "subtitle", "Create an account to get started." }

                div {
                    class: "actions",
                    if auth().is_logged_in() {
                        Link { class: "button button-primary", to: Route::Dashboard {}, "Go to dashboard" }
                    } else {
                        Link { class: "button button-primary", to: Route::Signup {}, "Sign Up" }
                        Link { class: "button button-outline", to: Route::Signin {}, "Sign In" }
                    }
                }
            }
        }
    }
}
