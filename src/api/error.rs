//! API client error types.

use thiserror::Error;

/// Result type for backend requests.
pub type ApiResult<T> = Result<T, RequestError>;

/// Errors surfaced by the API client.
///
/// No retry and no caching happen here; every failure is reported to the
/// calling view as-is.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Transport-level failure (connection refused, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `detail` carries the
    /// human-readable message when the response body supplies a textual one.
    #[error("backend returned status {status}")]
    Status { status: u16, detail: Option<String> },

    /// The response body was not the JSON we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl RequestError {
    /// HTTP status of the rejection, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend-supplied detail string, when there was one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            RequestError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True for 401-class rejections, the signal that the session is no
    /// longer accepted by the backend.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RequestError::Status { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_only_401() {
        let rejected = RequestError::Status {
            status: 401,
            detail: None,
        };
        assert!(rejected.is_unauthorized());

        let forbidden = RequestError::Status {
            status: 403,
            detail: Some("no access".to_string()),
        };
        assert!(!forbidden.is_unauthorized());
        assert_eq!(forbidden.status(), Some(403));
        assert_eq!(forbidden.detail(), Some("no access"));
    }
}
