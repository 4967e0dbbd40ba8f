//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Login
// ============================================================================

/// Login form submission (`application/x-www-form-urlencoded`)
///
/// Missing fields deserialize as empty so that they are reported as
/// "Please fill in all fields." instead of a framework rejection.
/// No `Debug`: the struct carries the clear text password.
#[derive(Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username_or_email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

/// Result envelope shared by login and logout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LoginResponse {
    pub fn success(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            success: true,
            success_message: Some(message.into()),
            redirect: Some(redirect.into()),
            error_message: None,
        }
    }
}

// ============================================================================
// Logout
// ============================================================================

/// Logout form submission
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub csrf_token: Option<String>,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_omits_error() {
        let json = serde_json::to_value(LoginResponse::success("Successful login", "home")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "success_message": "Successful login",
                "redirect": "home"
            })
        );
    }

    #[test]
    fn test_status_omits_username_when_anonymous() {
        let json = serde_json::to_value(SessionStatusResponse {
            authenticated: false,
            username: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "authenticated": false }));
    }
}
