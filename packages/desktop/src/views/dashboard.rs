//! Dashboard shown after a successful sign-up.

use dioxus::prelude::*;
use ui::{use_auth, LogoutButton};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let Some(user) = auth().user else {
        nav.replace(Route::Signin {});
        return rsx! {};
    };
    let name = user.display_name().to_string();

    rsx! {
        div {
            class: "page",

            div {
                class: "card",
                h1 { class: "card-title", "Welcome, {name}" }
                p { class: "subtitle", "Signed in as {user.email}" }

                LogoutButton {
                    class: "button button-outline",
                    onlogout: move |_| {
                        nav.replace(Route::Home {});
                    },
                }
            }
        }
    }
}
