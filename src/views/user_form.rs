use crate::api::use_admin_api;
use crate::control;
use crate::store::FormState;
use dioxus::prelude::*;

/// Create-user dialog. The dialog closes before the request is sent and
/// the request outlives it.
#[component]
pub fn UserForm(on_close: EventHandler<()>) -> Element {
    let api = use_admin_api();
    let mut form = use_signal(FormState::default);

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                div { class: "modal-header",
                    h3 { "Create user" }
                }
                div { class: "modal-body",
                    input {
                        class: "input",
                        placeholder: "JID",
                        value: "{form.read().jid}",
                        oninput: move |event| form.write().jid = event.value(),
                    }
                    div { class: "input-group",
                        input {
                            class: "input",
                            r#type: form.read().password_input_type(),
                            placeholder: "Password",
                            value: "{form.read().pwd}",
                            oninput: move |event| form.write().pwd = event.value(),
                        }
                        button {
                            class: "btn btn-icon",
                            onclick: move |_| form.write().toggle_reveal(),
                            if form.read().reveal {
                                "🙈"
                            } else {
                                "👁"
                            }
                        }
                    }
                }
                div { class: "modal-footer",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| {
                            let user = form.read().to_new_user();
                            on_close.call(());
                            let api = api.clone();
                            spawn_forever(async move {
                                if let Err(e) = control::create_user(&*api, user).await {
                                    log::warn!("Create user request failed: {}", e);
                                }
                            });
                        },
                        "Ok"
                    }
                    button { class: "btn btn-subtle", onclick: move |_| on_close.call(()), "Cancel" }
                }
            }
        }
    }
}
