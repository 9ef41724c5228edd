use crate::push::Subscription;
use crate::store::LogFeed;
use dioxus::prelude::*;

/// Control panel showing the backend log as it streams in
#[component]
pub fn Dashboard() -> Element {
    let feed = use_signal(LogFeed::default);
    use_log_channel(feed);

    rsx! {
        div { id: "dashboard-page",
            div { class: "panel",
                div { class: "panel-header", "Log" }
                div { class: "log-body",
                    if feed.read().is_empty() {
                        p { class: "muted", "Waiting for log messages..." }
                    }
                    ul { class: "log-list",
                        for (index , line) in feed.read().lines().iter().enumerate() {
                            li { key: "{index}",
                                span { class: "log-time", "{line.time()}" }
                                " {line.message}"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Subscribes to the push channel for as long as the calling component
/// is mounted, appending every log message to `feed`.
fn use_log_channel(feed: Signal<LogFeed>) {
    let subscription = use_hook(Subscription::new);

    #[cfg(feature = "web")]
    {
        let task_subscription = subscription.clone();
        use_future(move || {
            let subscription = task_subscription.clone();
            let mut feed = feed;
            async move {
                let endpoint = match crate::api::get_push_endpoint_server().await {
                    Ok(endpoint) => endpoint,
                    Err(e) => {
                        log::warn!("No push endpoint available: {}", e);
                        return;
                    }
                };
                crate::push::channel::run_log_channel(endpoint, subscription, move |message| {
                    feed.write().push(message)
                })
                .await;
            }
        });
    }
    #[cfg(not(feature = "web"))]
    let _ = feed;

    use_drop(move || subscription.close());
}
