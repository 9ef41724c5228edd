use crate::Route;
use dioxus::prelude::*;

/// Entries of the navigation sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ControlPanel,
    Users,
    Settings,
}

impl NavKey {
    pub const ALL: [NavKey; 3] = [NavKey::ControlPanel, NavKey::Users, NavKey::Settings];

    pub fn label(self) -> &'static str {
        match self {
            NavKey::ControlPanel => "Control Panel",
            NavKey::Users => "Users",
            NavKey::Settings => "Settings",
        }
    }

    pub fn route(self) -> Route {
        match self {
            NavKey::ControlPanel => Route::Dashboard {},
            NavKey::Users => Route::Users {},
            NavKey::Settings => Route::Settings {},
        }
    }

    pub fn for_route(route: &Route) -> Option<NavKey> {
        match route {
            Route::Dashboard {} => Some(NavKey::ControlPanel),
            Route::Users {} => Some(NavKey::Users),
            Route::Settings {} => Some(NavKey::Settings),
            Route::PageNotFound { .. } => None,
        }
    }
}

/// Entry highlighted for `route`; pages outside the sidebar fall back to
/// the control panel.
fn active_key(route: &Route) -> NavKey {
    NavKey::for_route(route).unwrap_or(NavKey::ControlPanel)
}

fn item_class(active: bool) -> &'static str {
    if active { "nav-item active" } else { "nav-item" }
}

#[component]
pub fn Sidebar() -> Element {
    // the sidebar outlives page changes, so the active entry is read from
    // the route on every render, back/forward navigation included
    let active = active_key(&use_route::<Route>());
    let navigator = use_navigator();

    rsx! {
        nav { id: "sidebar",
            div { class: "sidebar-header", "Jabber Admin" }
            ul { class: "sidebar-nav",
                for key in NavKey::ALL {
                    li {
                        key: "{key.label()}",
                        class: item_class(active == key),
                        onclick: move |_| {
                            navigator.push(key.route());
                        },
                        "{key.label()}"
                    }
                }
            }
        }
    }
}
