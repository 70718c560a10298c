use dioxus::prelude::*;
use tracing_subscriber::EnvFilter;
use views::{Dashboard, Home, Signin, Signup};

mod services;
mod views;

use services::AppServices;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/signup")]
    Signup {},
    #[route("/Signin")]
    Signin {},
    #[route("/dashboard")]
    Dashboard {},
}

impl From<ui::Destination> for Route {
    fn from(destination: ui::Destination) -> Self {
        match destination {
            ui::Destination::Dashboard => Route::Dashboard {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let services = use_hook(AppServices::load);

    match services {
        Ok(services) => rsx! {
            Shell { services }
        },
        Err(message) => rsx! {
            document::Link { rel: "stylesheet", href: MAIN_CSS }
            div {
                class: "page",
                div {
                    class: "card",
                    h1 { "Launchpad can't start" }
                    p { class: "error-text", "{message}" }
                }
            }
        },
    }
}

#[component]
fn Shell(services: AppServices) -> Element {
    use_context_provider(|| services.signup.clone());

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ui::AuthProvider {
            session: services.session().clone(),
            Router::<Route> {}
        }
    }
}
