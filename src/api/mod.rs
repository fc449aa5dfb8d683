//! HTTP transport to the management backend.
//!
//! Every authenticated request picks up the bearer credential from the
//! session store at call time.

mod client;
mod error;

pub use client::ApiClient;
pub use error::{ApiResult, RequestError};
