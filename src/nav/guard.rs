//! Navigation guard.

use std::sync::Arc;

use tracing::debug;

use crate::session::SessionStore;

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
}

/// Gates every navigation attempt on session presence.
///
/// Runs on every navigation, not only at startup, and can be wired to the
/// session store so that a logout redirects currently-open views as well.
/// The role never restricts direct path access here; it only shapes which
/// links the catalog offers.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    store: Arc<SessionStore>,
}

impl RouteGuard {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Evaluate a navigation attempt against the current session.
    pub fn evaluate(&self, route: &str) -> GuardDecision {
        if self.store.get().is_authenticated() {
            GuardDecision::Allow
        } else {
            debug!(route, "no session, redirecting to login");
            GuardDecision::RedirectToLogin
        }
    }

    /// Re-evaluate on every session change: `on_redirect` fires whenever the
    /// session disappears from under a guarded view, synchronously after the
    /// store has finished its mutation and durable write.
    pub fn watch(&self, on_redirect: impl Fn() + Send + Sync + 'static) {
        self.store.subscribe(move |session| {
            if !session.is_authenticated() {
                on_redirect();
            }
        });
    }
}
