//! Role navigation catalog.
//!
//! The mapping from role to navigation entries is total and fixed at build
//! time. Routes are derived from labels by [`route_slug`].

use crate::session::Role;

/// A navigation entry offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub route: String,
}

const ADMIN_LABELS: &[&str] = &[
    "Dashboard",
    "Units",
    "Residents",
    "Employees",
    "Finance",
    "Agenda",
    "Coverages",
    "Tickets",
    "Rounds",
    "Settings",
    "Audit",
];
const EMPLOYEE_LABELS: &[&str] = &["My Coverages", "Tickets", "Rounds"];
const RESIDENT_LABELS: &[&str] = &["My Unit", "Payments", "Agenda", "Tickets"];

/// Labels offered to a role, in menu order.
pub fn labels_for(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => ADMIN_LABELS,
        Role::Employee => EMPLOYEE_LABELS,
        Role::Resident => RESIDENT_LABELS,
    }
}

/// Navigation entries for a role.
///
/// With no resolved role nothing is offered. The guard only checks token
/// presence, so routes stay reachable by direct path in that case; there is
/// just no menu to them. The menu is a UI affordance, not a security
/// boundary — the backend enforces authorization.
pub fn entries_for(role: Option<Role>) -> Vec<NavEntry> {
    role.map(labels_for)
        .unwrap_or(&[])
        .iter()
        .map(|label| NavEntry {
            label,
            route: route_slug(label),
        })
        .collect()
}

/// Derive a route segment from a menu label: lowercase, spaces to hyphens.
///
/// Defined over the catalog labels above, which it maps without collision
/// within any role's list.
pub fn route_slug(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_role_has_entries() {
        for role in [Role::Admin, Role::Employee, Role::Resident] {
            assert!(!entries_for(Some(role)).is_empty(), "no entries for {role}");
        }
    }

    #[test]
    fn absent_role_has_no_entries() {
        assert!(entries_for(None).is_empty());
    }

    #[test]
    fn entries_are_stable_and_order_preserving() {
        for role in [Role::Admin, Role::Employee, Role::Resident] {
            let first = entries_for(Some(role));
            let second = entries_for(Some(role));
            assert_eq!(first, second);

            let labels: Vec<&str> = first.iter().map(|entry| entry.label).collect();
            assert_eq!(labels, labels_for(role).to_vec());
        }
    }

    #[test]
    fn slugs_are_lowercased_and_hyphenated() {
        assert_eq!(route_slug("Dashboard"), "dashboard");
        assert_eq!(route_slug("My Coverages"), "my-coverages");
        assert_eq!(route_slug("My Unit"), "my-unit");
    }

    #[test]
    fn slugs_do_not_collide_within_a_role() {
        for role in [Role::Admin, Role::Employee, Role::Resident] {
            let entries = entries_for(Some(role));
            let routes: HashSet<&str> = entries.iter().map(|entry| entry.route.as_str()).collect();
            assert_eq!(routes.len(), entries.len(), "slug collision for {role}");
        }
    }
}
