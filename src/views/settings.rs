use crate::store::SETTING_DEFAULTS;
use dioxus::prelude::*;

// Not persisted anywhere yet, the toggles only live in this page.
#[component]
pub fn Settings() -> Element {
    let mut toggles = use_signal(|| SETTING_DEFAULTS);

    rsx! {
        div { id: "settings-page",
            for index in 0..SETTING_DEFAULTS.len() {
                label { key: "{index}", class: "toggle",
                    input {
                        r#type: "checkbox",
                        checked: toggles.read()[index],
                        onchange: move |_| {
                            let mut current = toggles.write();
                            current[index] = !current[index];
                        },
                    }
                    span { class: "toggle-slider" }
                }
            }
        }
    }
}
