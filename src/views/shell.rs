use super::{ErrorPage, Sidebar};
use crate::Route;
use dioxus::prelude::*;

/// Sidebar plus the routed page, guarded by an error boundary
#[component]
pub fn Shell() -> Element {
    rsx! {
        div { class: "shell",
            Sidebar {}
            div { class: "shell-content",
                ErrorBoundary {
                    handle_error: |errors: ErrorContext| {
                        let message = errors
                            .errors()
                            .first()
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| "Unknown error".to_string());
                        log::error!("Rendering failed: {}", message);
                        rsx! {
                            ErrorPage { message }
                        }
                    },
                    Outlet::<Route> {}
                }
            }
        }
    }
}
