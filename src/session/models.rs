//! Session data models.

use serde::{Deserialize, Serialize};

/// User role.
///
/// Closed set: the backend may only hand out these three. The role shapes
/// which navigation entries are offered; it does not gate direct route
/// access, the guard only checks for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Condominium administrator.
    Admin,
    /// Staff member (security, maintenance).
    Employee,
    /// Unit resident.
    Resident,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Employee => write!(f, "employee"),
            Role::Resident => write!(f, "resident"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            "resident" => Ok(Role::Resident),
            _ => Err(format!("unknown role: {}", s)),
        }
    }
}

/// The identity of this client, if any.
///
/// Token and role are committed and cleared together; `role` can be absent
/// with a token present only when durable storage was seeded with a role
/// string this build does not recognize.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
