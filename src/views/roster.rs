use crate::api::use_admin_api;
use crate::control;
use crate::model::RosterEntry;
use crate::store::RosterState;
use dioxus::prelude::*;

/// Contacts of the selected user. Each change of `selected` fetches again.
#[component]
pub fn RosterDialog(
    selected: ReadOnlySignal<Option<i64>>,
    visible: bool,
    on_close: EventHandler<()>,
) -> Element {
    let api = use_admin_api();
    let roster = use_signal(RosterState::default);

    use_effect(move || {
        let selection = selected();
        let api = api.clone();
        spawn(async move {
            if let Err(e) = control::load_roster(&*api, &roster, selection).await {
                log::warn!("Could not fetch roster of user {:?}: {}", selection, e);
            }
        });
    });

    if !visible || selected().is_none() {
        return rsx! {};
    }

    let entries = roster.read().entries().to_vec();

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                div { class: "modal-header",
                    h3 { "Roster" }
                }
                div { class: "modal-body",
                    RosterList { entries }
                }
                div { class: "modal-footer",
                    button { class: "btn", onclick: move |_| on_close.call(()), "Close" }
                }
            }
        }
    }
}

/// One row per entry. The backend may list a contact twice, so rows are
/// keyed by position.
#[component]
pub fn RosterList(entries: Vec<RosterEntry>) -> Element {
    rsx! {
        ul { class: "roster-list",
            for (index , entry) in entries.iter().enumerate() {
                li { key: "{index}", class: "roster-item", "{entry.item}" }
            }
        }
    }
}
