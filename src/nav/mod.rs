//! Navigation: the role catalog and the route guard.

mod catalog;
mod guard;

pub use catalog::{NavEntry, entries_for, labels_for, route_slug};
pub use guard::{GuardDecision, RouteGuard};
