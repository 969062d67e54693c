//! Navigation for the application shell.
//!
//! - `resolver`: the static role → menu table
//! - `shell`: per-request sidebar view with active-route highlighting

pub mod resolver;
mod shell;

pub use resolver::{DASHBOARD_PATH, Icon, NavigationEntry, resolve, resolve_str};
pub use shell::{NavItem, NavigationShell};
