//! Login flow.
//!
//! Acquires a token, resolves the identity behind it, and commits both to
//! the session store in one step.

mod flow;
mod models;

pub use flow::{AuthError, AuthFlow, AuthState, DEFAULT_AUTHENTICATED_ROUTE};
pub use models::{LoginRequest, LoginResponse, MeResponse};
