//! Session Entity
//!
//! Server-side session record referenced by the signed `esw_session` cookie.
//! Holds the CSRF token and, after login, the authenticated identity.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::{csrf_token::CsrfToken, user_id::UserId};

/// Identity stored in the session after a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: UserId,
    pub username: String,
}

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Anti-forgery token, set once
    pub csrf_token: Option<CsrfToken>,
    /// Set only after successful authentication
    pub user: Option<SessionUser>,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new, anonymous session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(ttl_ms: i64) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            csrf_token: None,
            user: None,
            expires_at_ms: (now + Duration::milliseconds(ttl_ms)).timestamp_millis(),
            created_at: now,
        }
    }

    /// Issue a CSRF token if the session has none
    ///
    /// Returns `true` when a token was generated (the session must be saved).
    pub fn issue_csrf_token(&mut self) -> bool {
        if self.csrf_token.is_some() {
            return false;
        }
        self.csrf_token = Some(CsrfToken::generate());
        true
    }

    /// Check a submitted CSRF token; absent on either side never matches
    pub fn verify_csrf_token(&self, submitted: Option<&str>) -> bool {
        match (&self.csrf_token, submitted) {
            (Some(token), Some(submitted)) => token.matches(submitted),
            _ => false,
        }
    }

    /// Same data under a new identifier with a fresh lifetime
    ///
    /// The CSRF token is carried over, not rotated.
    pub fn regenerate(&self, ttl_ms: i64) -> Self {
        Self {
            csrf_token: self.csrf_token.clone(),
            user: self.user.clone(),
            ..Self::new(ttl_ms)
        }
    }

    /// Push the expiry out to `ttl_ms` from now
    pub fn touch(&mut self, ttl_ms: i64) {
        self.expires_at_ms = (Utc::now() + Duration::milliseconds(ttl_ms)).timestamp_millis();
    }

    /// Store the authenticated identity
    pub fn authenticate(&mut self, user: SessionUser) {
        self.user = Some(user);
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}
