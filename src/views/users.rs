use super::{RosterDialog, UserForm};
use crate::api::{ApiHandle, use_admin_api};
use crate::control;
use crate::model::User;
use crate::store::UserListState;
use dioxus::prelude::*;

#[component]
pub fn Users() -> Element {
    let state = use_signal(UserListState::default);
    rsx! {
        UserPanel { state }
    }
}

#[component]
fn UserPanel(state: Signal<UserListState>) -> Element {
    let api = use_admin_api();
    let form_visible = use_memo(move || state.read().form_visible());

    // runs on mount and again on every open/close of the form
    let refresh_api = api.clone();
    use_effect(move || {
        let _ = form_visible();
        let api = refresh_api.clone();
        spawn(async move {
            if let Err(e) = control::refresh_users(&*api, &state).await {
                log::warn!("Could not fetch users: {}", e);
            }
        });
    });

    let users: Vec<User> = state.read().users().to_vec();
    let roster_selected = state.read().roster_selected();
    let roster_visible = state.read().roster_visible();

    rsx! {
        div { id: "users-page",
            div { class: "toolbar",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| state.write().set_form_visible(true),
                    "Create user"
                }
            }
            table { class: "user-table",
                thead {
                    tr {
                        th { "Id" }
                        th { "JID" }
                        th { "" }
                    }
                }
                tbody {
                    for user in users.iter() {
                        UserRow {
                            key: "{user.id}",
                            user: user.clone(),
                            on_roster: move |id: i64| state.write().open_roster(id),
                            on_delete: {
                                let api = api.clone();
                                move |user: User| delete_with_prompt(api.clone(), state, user)
                            },
                        }
                    }
                }
            }
            if form_visible() {
                UserForm { on_close: move |_| state.write().set_form_visible(false) }
            }
            RosterDialog {
                selected: roster_selected,
                visible: roster_visible,
                on_close: move |_| state.write().close_roster(),
            }
        }
    }
}

#[component]
fn UserRow(user: User, on_roster: EventHandler<i64>, on_delete: EventHandler<User>) -> Element {
    let id = user.id;
    let target = user.clone();

    rsx! {
        tr {
            td { "{user.id}" }
            td { "{user.jid}" }
            td { class: "row-actions",
                button { class: "btn btn-link", onclick: move |_| on_roster.call(id), "Roster" }
                button {
                    class: "btn btn-danger",
                    onclick: move |_| on_delete.call(target.clone()),
                    "Delete"
                }
            }
        }
    }
}

fn delete_with_prompt(api: ApiHandle, state: Signal<UserListState>, user: User) {
    spawn(async move {
        let prompt = format!("Delete user {}?", user.jid);
        match control::delete_user(&*api, &state, user.id, || confirm(&prompt)).await {
            Ok(outcome) => log::debug!("Delete of user {}: {:?}", user.id, outcome),
            Err(e) => log::warn!("Delete of user {} did not complete: {}", user.id, e),
        }
    });
}

#[cfg(feature = "web")]
fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(not(feature = "web"))]
fn confirm(_message: &str) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::recording::{Call, RecordingApi};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Clone)]
    struct Harness {
        api: Rc<RecordingApi>,
        state: Rc<Cell<Option<Signal<UserListState>>>>,
    }

    fn harness_app(harness: Harness) -> Element {
        let api = harness.api.clone();
        use_context_provider(|| ApiHandle::new(api));
        let state = use_signal(UserListState::default);
        harness.state.set(Some(state));
        rsx! {
            UserPanel { state }
        }
    }

    fn mount(users: i64) -> (VirtualDom, Harness) {
        let harness = Harness {
            api: Rc::new(RecordingApi::with_users(users)),
            state: Rc::new(Cell::new(None)),
        };
        let mut dom = VirtualDom::new_with_props(harness_app, harness.clone());
        dom.rebuild_in_place();
        (dom, harness)
    }

    /// Runs effects and spawned requests until the dom goes quiet
    async fn settle(dom: &mut VirtualDom) {
        for _ in 0..20 {
            let work = tokio::time::timeout(Duration::from_millis(50), dom.wait_for_work());
            if work.await.is_err() {
                break;
            }
            dom.render_immediate_to_vec();
        }
    }

    fn set_form_visible(dom: &VirtualDom, harness: &Harness, visible: bool) {
        let mut state = harness.state.get().expect("harness mounted");
        dom.in_runtime(|| state.write().set_form_visible(visible));
    }

    fn list_calls(api: &RecordingApi) -> usize {
        api.calls().iter().filter(|c| **c == Call::ListUsers).count()
    }

    #[tokio::test]
    async fn test_table_shows_every_fetched_user() {
        let (mut dom, harness) = mount(3);
        settle(&mut dom).await;

        assert_eq!(harness.api.calls(), vec![Call::ListUsers]);
        let html = dioxus_ssr::render(&dom);
        assert_eq!(html.matches("@localhost").count(), 3);
        assert!(html.contains("user2@localhost"));
    }

    #[tokio::test]
    async fn test_form_open_and_close_each_refetch() {
        let (mut dom, harness) = mount(1);
        settle(&mut dom).await;
        assert_eq!(list_calls(&harness.api), 1);

        set_form_visible(&dom, &harness, true);
        settle(&mut dom).await;
        assert_eq!(list_calls(&harness.api), 2);

        set_form_visible(&dom, &harness, false);
        settle(&mut dom).await;
        assert_eq!(list_calls(&harness.api), 3);
        assert_eq!(harness.api.calls().len(), 3);
    }
}
