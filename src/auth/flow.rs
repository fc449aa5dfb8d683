//! Login state machine.
//!
//! Sequencing is the whole point here: acquire the token, resolve the
//! identity behind it, and only then commit the pair to the session store.
//! A token is never persisted on its own.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::{ApiClient, RequestError};
use crate::session::{Role, SessionStore};

use super::models::{LoginRequest, LoginResponse, MeResponse};

/// Route navigated to after a successful login.
pub const DEFAULT_AUTHENTICATED_ROUTE: &str = "/dashboard";

/// Shown when the backend rejection carries no textual detail.
const GENERIC_LOGIN_FAILURE: &str = "Login failed. Check your credentials.";

/// Errors inside the login sequence. Always recoverable; the flow translates
/// them into a user-facing message and allows resubmission.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("malformed response from backend: {0}")]
    MalformedResponse(String),

    #[error("unrecognized role `{0}` in identity response")]
    UnrecognizedRole(String),
}

/// Login flow state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Waiting for credential submission.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// Session committed; navigate to [`DEFAULT_AUTHENTICATED_ROUTE`].
    Authenticated,
    /// Submission rejected. The message is retained for display and the flow
    /// accepts another submission.
    Failed { message: String },
}

impl AuthState {
    pub fn can_submit(&self) -> bool {
        !matches!(self, AuthState::Submitting)
    }
}

/// Drives the login sequence and commits the resulting session.
pub struct AuthFlow {
    api: ApiClient,
    store: Arc<SessionStore>,
    state: AuthState,
}

impl AuthFlow {
    pub fn new(api: ApiClient, store: Arc<SessionStore>) -> Self {
        Self {
            api,
            store,
            state: AuthState::Idle,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Submit credentials.
    ///
    /// On success the session holds both token and role and the caller should
    /// navigate to [`DEFAULT_AUTHENTICATED_ROUTE`]. On failure nothing is
    /// persisted and the flow may be resubmitted indefinitely.
    #[instrument(skip_all, fields(identifier = %identifier))]
    pub async fn submit(&mut self, identifier: &str, secret: &str) -> &AuthState {
        if !self.state.can_submit() {
            return &self.state;
        }
        self.state = AuthState::Submitting;

        let outcome = self.login(identifier, secret).await;
        self.state = match outcome {
            Ok(role) => {
                info!(role = %role, "login succeeded");
                AuthState::Authenticated
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                AuthState::Failed {
                    message: failure_message(&err),
                }
            }
        };
        &self.state
    }

    async fn login(&self, identifier: &str, secret: &str) -> Result<Role, AuthError> {
        let request = LoginRequest {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        };
        let body = self.api.post("/auth/login", &request).await?;
        let login: LoginResponse = serde_json::from_value(body)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        // Resolve the identity with the candidate token before committing
        // anything. If this fails, no token reaches storage.
        let body = self.api.get_with_token("/me", &login.access_token).await?;
        let me: MeResponse = serde_json::from_value(body)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        let role: Role = me
            .role
            .parse()
            .map_err(|_| AuthError::UnrecognizedRole(me.role.clone()))?;

        self.store.set(Some(login.access_token), Some(role));
        Ok(role)
    }
}

fn failure_message(err: &AuthError) -> String {
    match err {
        AuthError::Request(RequestError::Status {
            detail: Some(detail),
            ..
        }) => format!("Login failed: {}", detail),
        _ => GENERIC_LOGIN_FAILURE.to_string(),
    }
}
