//! Access gate: decides whether a protected view renders or a denial view
//! is shown instead.

use serde::Serialize;

use crate::menu::{DASHBOARD_PATH, resolver};
use crate::models::Role;

/// Path of the public home page.
pub const HOME_PATH: &str = "/";

/// Required-role predicate for a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Any signed-in user, whatever their role.
    Authenticated,
    /// One of the listed roles.
    AnyOf(Vec<Role>),
}

impl RoleRequirement {
    /// Must be admin.
    pub fn admin() -> Self {
        Self::AnyOf(vec![Role::Admin])
    }

    /// Roles whose menu links to `path`.
    pub fn for_path(path: &str) -> Self {
        Self::AnyOf(resolver::roles_for_path(path))
    }

    /// Whether `role` satisfies the requirement.
    pub fn allows(&self, role: Option<Role>) -> bool {
        match self {
            Self::Authenticated => true,
            Self::AnyOf(roles) => role.is_some_and(|r| roles.contains(&r)),
        }
    }
}

/// A navigation offered on the denial view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecoveryAction {
    pub label: &'static str,
    pub path: &'static str,
}

/// Denial view contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denial {
    pub actions: [RecoveryAction; 2],
}

impl Default for Denial {
    fn default() -> Self {
        Self {
            actions: [
                RecoveryAction {
                    label: "Ir al Dashboard",
                    path: DASHBOARD_PATH,
                },
                RecoveryAction {
                    label: "Volver al inicio",
                    path: HOME_PATH,
                },
            ],
        }
    }
}

/// Outcome of an access check. There is no intermediate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied(Denial),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Pure decision over a role and a requirement.
pub struct AccessGate;

impl AccessGate {
    pub fn check(role: Option<Role>, requirement: &RoleRequirement) -> AccessDecision {
        if requirement.allows(role) {
            AccessDecision::Allowed
        } else {
            AccessDecision::Denied(Denial::default())
        }
    }
}
