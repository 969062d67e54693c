//! Role menu resolver - maps a role to its fixed navigation entries.
//!
//! The table is static: every role gets the base "Dashboard" entry followed
//! by the entries listed for it. Anything outside the known role set gets
//! the base entry alone.

use serde::Serialize;

use crate::models::Role;

/// Symbolic icon reference. Serialized as a kebab-case id for templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    LayoutDashboard,
    Shield,
    Inbox,
    BarChart,
    Settings,
    Building,
    Users,
    Shirt,
    Trophy,
    Calendar,
    MessageSquare,
    Dumbbell,
    Activity,
    Baby,
    TrendingUp,
}

/// A single menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub title: &'static str,
    pub path: &'static str,
    pub icon: Icon,
}

const fn entry(title: &'static str, path: &'static str, icon: Icon) -> NavigationEntry {
    NavigationEntry { title, path, icon }
}

/// Path of the dashboard, present in every menu.
pub const DASHBOARD_PATH: &str = "/dashboard";

const BASE: [NavigationEntry; 1] = [entry("Dashboard", DASHBOARD_PATH, Icon::LayoutDashboard)];

const ADMIN: [NavigationEntry; 4] = [
    entry("Admin Panel", "/admin", Icon::Shield),
    entry("Requests", "/admin/requests", Icon::Inbox),
    entry("Analytics", "/admin/analytics", Icon::BarChart),
    entry("Settings", "/settings", Icon::Settings),
];

const COACH: [NavigationEntry; 7] = [
    entry("Club", "/club", Icon::Building),
    entry("Players", "/players", Icon::Users),
    entry("Teams", "/teams", Icon::Shirt),
    entry("Matches", "/matches", Icon::Trophy),
    entry("Statistics", "/statistics", Icon::BarChart),
    entry("Calendar", "/calendar", Icon::Calendar),
    entry("Messages", "/messages", Icon::MessageSquare),
];

const PLAYER: [NavigationEntry; 5] = [
    entry("My Team", "/my-team", Icon::Users),
    entry("Training", "/training", Icon::Dumbbell),
    entry("My Stats", "/my-stats", Icon::Activity),
    entry("Tournaments", "/tournaments", Icon::Trophy),
    entry("Messages", "/messages", Icon::MessageSquare),
];

const PARENT: [NavigationEntry; 4] = [
    entry("My Children", "/my-children", Icon::Baby),
    entry("Schedule", "/schedule", Icon::Calendar),
    entry("Progress", "/progress", Icon::TrendingUp),
    entry("Messages", "/messages", Icon::MessageSquare),
];

/// Entries appended after the base entry for a role.
fn role_entries(role: Option<Role>) -> &'static [NavigationEntry] {
    match role {
        Some(Role::Admin) => &ADMIN,
        Some(Role::Player) => &PLAYER,
        Some(Role::Parent) => &PARENT,
        Some(role) if role.is_coach() => &COACH,
        _ => &[],
    }
}

/// Resolve the ordered menu for a role. Total and deterministic.
pub fn resolve(role: Option<Role>) -> Vec<NavigationEntry> {
    BASE.iter().chain(role_entries(role)).copied().collect()
}

/// Resolve the menu for a raw role id. Unknown or empty ids get the base menu.
pub fn resolve_str(role: &str) -> Vec<NavigationEntry> {
    resolve(Role::parse(role))
}

/// Every role whose menu links to `path`.
pub fn roles_for_path(path: &str) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| resolve(Some(*role)).iter().any(|e| e.path == path))
        .collect()
}

/// The entry serving `path` in any role's menu.
pub fn find_entry(path: &str) -> Option<NavigationEntry> {
    all_entries().into_iter().find(|e| e.path == path)
}

/// Every distinct entry across all menus, base entry first.
pub fn all_entries() -> Vec<NavigationEntry> {
    let mut entries: Vec<NavigationEntry> = Vec::new();
    for e in BASE
        .iter()
        .chain(ADMIN.iter())
        .chain(COACH.iter())
        .chain(PLAYER.iter())
        .chain(PARENT.iter())
    {
        if !entries.iter().any(|seen| seen.path == e.path) {
            entries.push(*e);
        }
    }
    entries
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn titles(entries: &[NavigationEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.title).collect()
    }

    #[test]
    fn admin_menu() {
        assert_eq!(
            titles(&resolve(Some(Role::Admin))),
            vec!["Dashboard", "Admin Panel", "Requests", "Analytics", "Settings"]
        );
    }

    #[test]
    fn coach_variants_share_one_menu() {
        let expected = vec![
            "Dashboard",
            "Club",
            "Players",
            "Teams",
            "Matches",
            "Statistics",
            "Calendar",
            "Messages",
        ];
        for role in [Role::Coach, Role::CoachMain, Role::CoachTeam] {
            assert_eq!(titles(&resolve(Some(role))), expected, "{role}");
        }
    }

    #[test]
    fn player_menu() {
        assert_eq!(
            titles(&resolve_str("player")),
            vec!["Dashboard", "My Team", "Training", "My Stats", "Tournaments", "Messages"]
        );
    }

    #[test]
    fn parent_menu() {
        assert_eq!(
            titles(&resolve_str("parent")),
            vec!["Dashboard", "My Children", "Schedule", "Progress", "Messages"]
        );
    }

    #[test]
    fn every_menu_starts_with_dashboard() {
        for role in Role::ALL {
            let menu = resolve(Some(role));
            assert_eq!(menu[0].title, "Dashboard");
            assert_eq!(menu[0].path, DASHBOARD_PATH);
        }
    }

    #[test]
    fn unknown_roles_get_base_menu() {
        for raw in ["", "referee", "ADMIN", "coach "] {
            let menu = resolve_str(raw);
            assert_eq!(menu.len(), 1, "{raw:?}");
            assert_eq!(menu[0].title, "Dashboard");
        }
        assert_eq!(resolve(None), BASE.to_vec());
    }

    #[test]
    fn resolution_is_deterministic() {
        for role in Role::ALL {
            assert_eq!(resolve(Some(role)), resolve(Some(role)));
        }
    }

    #[test]
    fn paths_within_a_menu_are_unique() {
        for role in Role::ALL {
            let menu = resolve(Some(role));
            for (i, a) in menu.iter().enumerate() {
                assert!(menu[i + 1..].iter().all(|b| b.path != a.path));
            }
        }
    }

    #[test]
    fn roles_for_shared_path() {
        assert_eq!(
            roles_for_path("/messages"),
            vec![
                Role::Coach,
                Role::CoachMain,
                Role::CoachTeam,
                Role::Player,
                Role::Parent
            ]
        );
        assert_eq!(roles_for_path("/admin"), vec![Role::Admin]);
        assert_eq!(roles_for_path(DASHBOARD_PATH), Role::ALL.to_vec());
        assert!(roles_for_path("/nowhere").is_empty());
    }

    #[test]
    fn find_entry_by_path() {
        let entry = find_entry("/my-stats").unwrap();
        assert_eq!(entry.title, "My Stats");
        assert_eq!(entry.icon, Icon::Activity);
        assert!(find_entry("/my-stats/2024").is_none());
    }

    #[test]
    fn all_entries_are_distinct() {
        let entries = all_entries();
        assert_eq!(entries[0].path, DASHBOARD_PATH);
        // 1 base + 4 admin + 7 coach + 4 player-only + 3 parent-only
        assert_eq!(entries.len(), 19);
    }

    #[test]
    fn icons_serialize_as_kebab_ids() {
        let json = serde_json::to_value(resolve(Some(Role::Parent))).unwrap();
        assert_eq!(json[0]["icon"], "layout-dashboard");
        assert_eq!(json[3]["icon"], "trending-up");
        assert_eq!(json[4]["icon"], "message-square");
    }
}
