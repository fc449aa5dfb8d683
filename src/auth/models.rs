//! Login wire types.

use serde::{Deserialize, Serialize};

/// Credentials submitted to `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub secret: String,
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Identity response from `GET /me`.
///
/// The backend may return more fields; only the role matters here. It stays
/// a raw string until the flow parses it against the closed role set.
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_request_wire_form() {
        let request = LoginRequest {
            identifier: "admin@vp.local".to_string(),
            secret: "admin123".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "identifier": "admin@vp.local", "secret": "admin123" })
        );
    }

    #[test]
    fn me_response_ignores_extra_fields() {
        let me: MeResponse =
            serde_json::from_value(json!({ "role": "admin", "email": "admin@vp.local" })).unwrap();
        assert_eq!(me.role, "admin");
    }
}
