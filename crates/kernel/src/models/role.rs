//! Role model.
//!
//! Roles form a closed set. Profiles keep the raw role string so that a
//! value outside the set can still be shown to the user as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role assumed when a profile carries no role at all.
pub const DEFAULT_ROLE: &str = "player";

/// Authorization tier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Coach,
    CoachMain,
    CoachTeam,
    Player,
    Parent,
}

/// Returned when a string is not one of the known role ids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Every known role, in declaration order.
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Coach,
        Role::CoachMain,
        Role::CoachTeam,
        Role::Player,
        Role::Parent,
    ];

    /// Wire id of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Coach => "coach",
            Role::CoachMain => "coach_main",
            Role::CoachTeam => "coach_team",
            Role::Player => "player",
            Role::Parent => "parent",
        }
    }

    /// Parse a wire id. Unrecognized values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }

    /// Whether this is one of the coach variants.
    pub fn is_coach(self) -> bool {
        matches!(self, Role::Coach | Role::CoachMain | Role::CoachTeam)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}
