mod api;
mod backend;
mod config;
mod control;
mod error;
mod model;
mod push;
mod state;
mod store;
mod views;

use dioxus::prelude::*;
use views::{Dashboard, PageNotFound, Settings, Shell, Users};

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Dashboard {},
        #[route("/users")]
        Users {},
        #[route("/settings")]
        Settings {},
    #[end_layout]
    #[route("/:..segments")]
    PageNotFound { segments: Vec<String> },
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

#[cfg(feature = "server")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    env_logger::init();

    let args = config::Args::parse();
    let admin_config = config::AdminConfig::try_from(&args)?;
    let backend_origin = admin_config.backend_origin().to_string();
    state::install(admin_config).await;

    let addr = args
        .addr
        .unwrap_or_else(dioxus_cli_config::fullstack_address_or_localhost);
    let serve_config =
        ServeConfig::new().map_err(|_| "unable to load the dashboard index.html")?;
    let router = axum::Router::new().serve_dioxus_application(serve_config, App);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!(
        "Serving admin dashboard on http://{} for backend {}",
        addr,
        backend_origin
    );

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[cfg(not(feature = "server"))]
fn main() {
    #[cfg(feature = "web")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }
    dioxus::launch(App);
}
