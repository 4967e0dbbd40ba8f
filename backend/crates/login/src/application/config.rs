//! Application Configuration
//!
//! Configuration for the login application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::HashScheme;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Session cookie lifetime (365 days)
pub const SESSION_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Server-side idle lifetime of a session nobody has logged in to (24 minutes)
pub const ANONYMOUS_SESSION_TTL: Duration = Duration::from_secs(24 * 60);

/// Login application configuration
#[derive(Debug, Clone)]
pub struct LoginConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session and cookie lifetime
    pub session_lifetime: Duration,
    /// Idle lifetime of anonymous sessions, refreshed on each page load
    pub anonymous_session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Cookie domain; `None` keeps the server default (host-only)
    pub cookie_domain: Option<String>,
    /// Redirect target after a successful login
    pub home_url: String,
    /// Redirect target after logout
    pub login_url: String,
    /// Hash family used for the unknown-user dummy verification;
    /// should match what the users table mostly holds
    pub dummy_hash_scheme: HashScheme,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "esw_session".to_string(),
            session_secret: random_secret(),
            session_lifetime: SESSION_LIFETIME,
            anonymous_session_ttl: ANONYMOUS_SESSION_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            cookie_domain: None,
            home_url: "home".to_string(),
            login_url: "login".to_string(),
            dummy_hash_scheme: HashScheme::Bcrypt,
        }
    }
}

impl LoginConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    /// Get session lifetime in milliseconds
    pub fn session_lifetime_ms(&self) -> i64 {
        self.session_lifetime.as_millis() as i64
    }

    /// Get anonymous session idle lifetime in milliseconds
    pub fn anonymous_session_ttl_ms(&self) -> i64 {
        self.anonymous_session_ttl.as_millis() as i64
    }

    /// Cookie attributes for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            domain: self.cookie_domain.clone(),
            max_age_secs: Some(self.session_lifetime.as_secs()),
        }
    }
}

/// Fresh HMAC key from the OS CSPRNG
fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&platform::crypto::random_bytes(32));
    secret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoginConfig::default();

        assert_eq!(config.session_cookie_name, "esw_session");
        assert_eq!(config.session_lifetime, Duration::from_secs(31_536_000));
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Lax);
        assert_eq!(config.home_url, "home");
        assert!(config.anonymous_session_ttl < config.session_lifetime);
        assert_eq!(config.dummy_hash_scheme, HashScheme::Bcrypt);
    }

    #[test]
    fn test_default_secret_is_random() {
        let config1 = LoginConfig::default();
        let config2 = LoginConfig::default();

        assert_ne!(config1.session_secret, config2.session_secret);
        assert!(config1.session_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_session_cookie_flags() {
        let cookie = LoginConfig::default().session_cookie().build_set_cookie("v");

        assert!(cookie.starts_with("esw_session=v"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=31536000"));

        let dev_cookie = LoginConfig::development().session_cookie().build_set_cookie("v");
        assert!(!dev_cookie.contains("Secure"));
    }
}
