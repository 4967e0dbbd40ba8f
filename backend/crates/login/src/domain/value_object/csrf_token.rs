//! CSRF Token Value Object
//!
//! 32 bytes from the OS CSPRNG, lowercase hex encoded (64 characters).
//! One token per session; it is issued only when the session has none.

use std::fmt;

/// Random bytes per token
pub const CSRF_TOKEN_BYTES: usize = 32;

/// Encoded token length
pub const CSRF_TOKEN_HEX_LEN: usize = CSRF_TOKEN_BYTES * 2;

/// Anti-forgery token stored in the session
///
/// Deliberately not `PartialEq`: comparisons go through [`CsrfToken::matches`].
#[derive(Clone)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Generate a fresh token
    pub fn generate() -> Self {
        Self(platform::crypto::random_hex(CSRF_TOKEN_BYTES))
    }

    /// Restore a token read from the session store
    ///
    /// Returns `None` unless the value is exactly 64 lowercase hex characters.
    pub fn from_stored(s: impl Into<String>) -> Option<Self> {
        let s = s.into();
        let well_formed = s.len() == CSRF_TOKEN_HEX_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then_some(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against a submitted value
    pub fn matches(&self, submitted: &str) -> bool {
        platform::crypto::constant_time_eq(self.0.as_bytes(), submitted.as_bytes())
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CsrfToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let token = CsrfToken::generate();
        assert_eq!(token.as_str().len(), 64);
        assert!(CsrfToken::from_stored(token.as_str()).is_some());
        assert_ne!(token.as_str(), CsrfToken::generate().as_str());
    }

    #[test]
    fn test_matches() {
        let token = CsrfToken::generate();
        let echoed = token.as_str().to_string();
        assert!(token.matches(&echoed));

        let mut forged = echoed.clone();
        forged.replace_range(63.., if echoed.ends_with('0') { "1" } else { "0" });
        assert!(!token.matches(&forged));
        assert!(!token.matches(""));
        assert!(!token.matches(&echoed[..32]));
        assert!(!token.matches(&echoed.to_uppercase()));
    }

    #[test]
    fn test_from_stored_rejects_malformed() {
        assert!(CsrfToken::from_stored("abc").is_none());
        assert!(CsrfToken::from_stored("G".repeat(64)).is_none());
        assert!(CsrfToken::from_stored("A".repeat(64)).is_none());
        assert!(CsrfToken::from_stored("a".repeat(64)).is_some());
    }
}
