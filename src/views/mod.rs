//! Web interface components of the admin dashboard
//!
//! This module contains the Dioxus components that make up the dashboard:
//! the shell with its sidebar, the three routed pages and their dialogs.

/// Layout wrapping every page
mod shell;
pub use shell::Shell;

/// Navigation sidebar
mod sidebar;
pub use sidebar::Sidebar;

/// Live log page
mod dashboard;
pub use dashboard::Dashboard;

/// User table
mod users;
pub use users::Users;

/// Create-user dialog
mod user_form;
pub use user_form::UserForm;

/// Roster dialog
mod roster;
pub use roster::RosterDialog;

/// Settings toggles
mod settings;
pub use settings::Settings;

/// Error and not-found pages
mod error_page;
pub use error_page::{ErrorPage, PageNotFound};
