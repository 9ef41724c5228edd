use dioxus::prelude::*;

#[component]
pub fn ErrorPage(message: String) -> Element {
    rsx! {
        div { id: "error-page",
            h1 { "Oops!" }
            p { "Sorry, an unexpected error has occurred." }
            p {
                i { "{message}" }
            }
        }
    }
}

#[component]
pub fn PageNotFound(segments: Vec<String>) -> Element {
    log::warn!("No page at /{}", segments.join("/"));
    rsx! {
        ErrorPage { message: "Not Found".to_string() }
    }
}
