//! Navigation shell - resolved menu entries with active-route highlighting.

use serde::Serialize;

use super::resolver::{self, NavigationEntry};
use crate::models::UserProfile;

/// One rendered sidebar item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    #[serde(flatten)]
    pub entry: NavigationEntry,
    /// Highlighted iff the entry path equals the active path exactly.
    pub active: bool,
    /// False in collapsed mode; icon and link are always kept.
    pub show_label: bool,
}

/// Derived view of the sidebar for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationShell {
    items: Vec<NavItem>,
    active_path: String,
    collapsed: bool,
}

impl NavigationShell {
    /// Build the shell from resolved entries and the active path.
    pub fn new(entries: Vec<NavigationEntry>, active_path: &str, collapsed: bool) -> Self {
        let items = entries
            .into_iter()
            .map(|entry| NavItem {
                active: entry.path == active_path,
                show_label: !collapsed,
                entry,
            })
            .collect();

        Self {
            items,
            active_path: active_path.to_string(),
            collapsed,
        }
    }

    /// Resolve the profile's menu and build the shell from it.
    pub fn for_profile(profile: &UserProfile, active_path: &str, collapsed: bool) -> Self {
        Self::new(resolver::resolve_str(&profile.role), active_path, collapsed)
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn active_path(&self) -> &str {
        &self.active_path
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Number of highlighted items (0 or 1 for menus with unique paths).
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| item.active).count()
    }

    /// The highlighted item, if any.
    pub fn active_item(&self) -> Option<&NavItem> {
        self.items.iter().find(|item| item.active)
    }
}
