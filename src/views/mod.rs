//! Data views over the backend: generic lists, the dashboard, branding.
//!
//! These are the client's page bodies. They stay thin: fetch, react to a
//! rejected session, fall back to something displayable.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{ApiClient, RequestError};
use crate::session::SessionStore;

/// Backend endpoint backing a route's list view.
pub fn endpoint_for(route: &str) -> Option<&'static str> {
    Some(match route {
        "units" | "my-unit" => "/units",
        "residents" | "employees" => "/users",
        "finance" | "payments" => "/payments",
        "agenda" => "/agenda",
        "coverages" | "my-coverages" => "/coverages",
        "tickets" => "/tickets",
        "rounds" => "/rounds",
        "settings" => "/public-config",
        "audit" => "/audit",
        _ => return None,
    })
}

/// Result of a fetch that may have been overtaken by a session change.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Fresh(T),
    /// The session changed while the request was in flight; the response must
    /// not overwrite newer state.
    Stale,
}

/// Dashboard card values, straight from the two sub-resources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub finance: Value,
    pub operations: Value,
}

/// Fetches page data with the session semantics every view shares.
pub struct PageData {
    api: ApiClient,
    store: Arc<SessionStore>,
}

impl PageData {
    pub fn new(api: ApiClient, store: Arc<SessionStore>) -> Self {
        Self { api, store }
    }

    /// Fetch the rows behind a route.
    ///
    /// A 401 means the backend no longer accepts the session: clear it so the
    /// guard redirects on the next evaluation, and propagate the error. Any
    /// other failure falls back to an empty result set, which is what the
    /// list pages display. A response that arrives after the session changed
    /// is discarded as stale.
    pub async fn list(&self, route: &str) -> Result<Fetched<Vec<Value>>, RequestError> {
        let Some(endpoint) = endpoint_for(route) else {
            return Ok(Fetched::Fresh(Vec::new()));
        };

        let issued_at = self.store.epoch();
        let result = self.api.get(endpoint).await;
        if self.store.epoch() != issued_at {
            debug!(route, "discarding stale response after session change");
            return Ok(Fetched::Stale);
        }

        match result {
            Ok(Value::Array(rows)) => Ok(Fetched::Fresh(rows)),
            Ok(other) => Ok(Fetched::Fresh(vec![other])),
            Err(err) if err.is_unauthorized() => {
                warn!(route, "session rejected by backend, clearing");
                self.store.clear();
                Err(err)
            }
            Err(err) => {
                debug!(route, error = %err, "list fetch failed, showing empty result");
                Ok(Fetched::Fresh(Vec::new()))
            }
        }
    }

    /// Aggregate the two dashboard sub-resources. Each card falls back to an
    /// absent value on failure; a 401 clears the session like any other view.
    pub async fn dashboard(&self) -> Result<Fetched<DashboardSummary>, RequestError> {
        let issued_at = self.store.epoch();
        let finance = self.api.get("/dashboard/finance").await;
        let operations = self.api.get("/dashboard/operations").await;
        if self.store.epoch() != issued_at {
            debug!("discarding stale dashboard response after session change");
            return Ok(Fetched::Stale);
        }

        let mut summary = DashboardSummary::default();
        for (slot, result) in [
            (&mut summary.finance, finance),
            (&mut summary.operations, operations),
        ] {
            match result {
                Ok(value) => *slot = value,
                Err(err) if err.is_unauthorized() => {
                    warn!("session rejected by backend, clearing");
                    self.store.clear();
                    return Err(err);
                }
                Err(err) => debug!(error = %err, "dashboard card fetch failed"),
            }
        }
        Ok(Fetched::Fresh(summary))
    }
}

/// Branding served by `/public-config`. Cosmetic page chrome only; every
/// failure falls back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub brand_name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub logo_path: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            brand_name: "Vigilância Patrimonial".to_string(),
            primary_color: "#14b8a6".to_string(),
            secondary_color: "#111827".to_string(),
            logo_path: "/logo.svg".to_string(),
        }
    }
}

/// Fetch branding, unauthenticated. Never fails; defaults cover any error.
pub async fn branding(api: &ApiClient) -> Branding {
    match api.get("/public-config").await {
        Ok(body) => serde_json::from_value(body).unwrap_or_default(),
        Err(err) => {
            debug!(error = %err, "branding fetch failed, using defaults");
            Branding::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::entries_for;
    use crate::session::Role;

    #[test]
    fn every_catalog_route_except_dashboard_has_an_endpoint() {
        for role in [Role::Admin, Role::Employee, Role::Resident] {
            for entry in entries_for(Some(role)) {
                if entry.route == "dashboard" {
                    continue;
                }
                assert!(
                    endpoint_for(&entry.route).is_some(),
                    "no endpoint for route {}",
                    entry.route
                );
            }
        }
    }

    #[test]
    fn unknown_route_has_no_endpoint() {
        assert_eq!(endpoint_for("garage"), None);
    }

    #[test]
    fn branding_defaults_match_the_built_in_chrome() {
        let branding = Branding::default();
        assert_eq!(branding.brand_name, "Vigilância Patrimonial");
        assert_eq!(branding.primary_color, "#14b8a6");
    }
}
