//! Password Hash Verification
//!
//! Verifies submitted passwords against stored one-way hashes:
//! - Argon2 PHC strings (`$argon2id$...`), the format new hashes are written in
//! - bcrypt strings (`$2y$`, `$2b$`, `$2a$`), as found in tables populated by
//!   PHP `password_hash`
//!
//! ## Security Features
//! - Zeroization of the clear text password on drop
//! - Redacted `Debug` output for both clear text and hashes
//! - Constant-time comparison inside both verifiers

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// bcrypt hashes are always 60 characters: `$2y$NN$` + 22 salt + 31 hash
const BCRYPT_HASH_LENGTH: usize = 60;

/// Argon2id hash of no real password, with the default cost parameters
const DUMMY_ARGON2_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// bcrypt hash of no real password at PHP's default cost of 10
const DUMMY_BCRYPT_HASH: &str =
    "$2y$10$.....................................................";

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored value is not a hash this crate understands
    #[error("Unsupported password hash format")]
    UnsupportedFormat,

    /// Stored value claims a known scheme but does not parse
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// Verifier failed for a reason other than a mismatch
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// No policy is applied here: a login must be able to check whatever
/// password the stored hash was created from.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id with a random 128-bit salt
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);

        // OWASP recommended Argon2id parameters:
        // m=19456 (19 MiB), t=2, p=1
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
            scheme: HashScheme::Argon2,
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// One-way hash families accepted from the users table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    Argon2,
    Bcrypt,
}

/// Stored password hash
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, HashedPassword};
///
/// let password = ClearTextPassword::new("correct horse".to_string());
/// let stored = password.hash().unwrap();
///
/// let restored = HashedPassword::from_stored(stored.as_str()).unwrap();
/// assert!(restored.verify(&password).unwrap());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
    scheme: HashScheme,
}

impl HashedPassword {
    /// Parse a hash read from the database
    pub fn from_stored(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        let scheme = if hash.starts_with("$argon2") {
            PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
            HashScheme::Argon2
        } else if is_bcrypt_prefix(&hash) {
            if hash.len() != BCRYPT_HASH_LENGTH {
                return Err(PasswordHashError::InvalidHashFormat);
            }
            HashScheme::Bcrypt
        } else {
            return Err(PasswordHashError::UnsupportedFormat);
        };

        Ok(Self { hash, scheme })
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Verify a password against this hash
    ///
    /// ## Returns
    /// - `Ok(true)` on match
    /// - `Ok(false)` on mismatch
    /// - `Err(_)` if the stored hash is unusable
    pub fn verify(&self, password: &ClearTextPassword) -> Result<bool, PasswordHashError> {
        match self.scheme {
            HashScheme::Argon2 => {
                let parsed = PasswordHash::new(&self.hash)
                    .map_err(|_| PasswordHashError::InvalidHashFormat)?;

                // Parameters come from the PHC string, not from Argon2::default()
                match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordHashError::VerificationFailed(e.to_string())),
                }
            }
            HashScheme::Bcrypt => bcrypt::verify(password.as_bytes(), &self.hash)
                .map_err(|e| PasswordHashError::VerificationFailed(e.to_string())),
        }
    }

    /// Check if the hash should be upgraded to Argon2id
    pub fn needs_rehash(&self) -> bool {
        match self.scheme {
            HashScheme::Bcrypt => true,
            HashScheme::Argon2 => match PasswordHash::new(&self.hash) {
                Ok(parsed) => parsed.algorithm != argon2::Algorithm::Argon2id.ident(),
                Err(_) => true,
            },
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("scheme", &self.scheme)
            .field("hash", &"[HASH]")
            .finish()
    }
}

/// Spend the work of one verification when there is no stored hash
///
/// Keeps "unknown user" and "wrong password" close in response time, as
/// long as `scheme` matches the hashes the users table actually holds.
pub fn verify_dummy(password: &ClearTextPassword, scheme: HashScheme) {
    let dummy = match scheme {
        HashScheme::Argon2 => DUMMY_ARGON2_HASH,
        HashScheme::Bcrypt => DUMMY_BCRYPT_HASH,
    };
    if let Ok(hashed) = HashedPassword::from_stored(dummy) {
        let _ = hashed.verify(password);
    }
}

fn is_bcrypt_prefix(hash: &str) -> bool {
    ["$2y$", "$2b$", "$2a$"]
        .iter()
        .any(|prefix| hash.starts_with(prefix))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn password(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string())
    }

    #[test]
    fn test_argon2_hash_and_verify() {
        let hashed = password("TestPassword123!").hash().unwrap();
        assert_eq!(hashed.scheme(), HashScheme::Argon2);
        assert!(hashed.as_str().starts_with("$argon2id$"));

        assert!(hashed.verify(&password("TestPassword123!")).unwrap());
        assert!(!hashed.verify(&password("WrongPassword123!")).unwrap());
    }

    #[test]
    fn test_stored_argon2_roundtrip() {
        let hashed = password("TestPassword123!").hash().unwrap();
        let restored = HashedPassword::from_stored(hashed.as_str().to_string()).unwrap();

        assert!(restored.verify(&password("TestPassword123!")).unwrap());
        assert!(!restored.needs_rehash());
    }

    #[test]
    fn test_php_bcrypt_hash() {
        // PHP writes `$2y$`; the algorithm is identical to `$2b$`
        let b_hash = bcrypt::hash("secret-pass", 4).unwrap();
        let y_hash = b_hash.replacen("$2b$", "$2y$", 1);

        let stored = HashedPassword::from_stored(y_hash).unwrap();
        assert_eq!(stored.scheme(), HashScheme::Bcrypt);
        assert!(stored.verify(&password("secret-pass")).unwrap());
        assert!(!stored.verify(&password("secret-pasS")).unwrap());
        assert!(stored.needs_rehash());
    }

    #[test]
    fn test_unsupported_hash() {
        let result = HashedPassword::from_stored("5f4dcc3b5aa765d61d8327deb882cf99");
        assert!(matches!(result, Err(PasswordHashError::UnsupportedFormat)));

        let result = HashedPassword::from_stored("plaintext");
        assert!(matches!(result, Err(PasswordHashError::UnsupportedFormat)));
    }

    #[test]
    fn test_malformed_hash() {
        let result = HashedPassword::from_stored("$argon2id$garbage");
        assert!(matches!(result, Err(PasswordHashError::InvalidHashFormat)));

        let result = HashedPassword::from_stored("$2y$10$tooshort");
        assert!(matches!(result, Err(PasswordHashError::InvalidHashFormat)));
    }

    #[test]
    fn test_dummy_hash_is_well_formed() {
        let dummy = HashedPassword::from_stored(DUMMY_ARGON2_HASH).unwrap();
        assert_eq!(dummy.scheme(), HashScheme::Argon2);
        assert!(!dummy.verify(&password("anything")).unwrap());
        verify_dummy(&password("anything"), HashScheme::Argon2);
    }

    #[test]
    fn test_dummy_bcrypt_hash_is_well_formed() {
        assert_eq!(DUMMY_BCRYPT_HASH.len(), BCRYPT_HASH_LENGTH);

        let dummy = HashedPassword::from_stored(DUMMY_BCRYPT_HASH).unwrap();
        assert_eq!(dummy.scheme(), HashScheme::Bcrypt);
        // Same cost as PHP's password_hash default, so a miss costs a real bcrypt round
        assert!(dummy.as_str().starts_with("$2y$10$"));
        assert!(!dummy.verify(&password("anything")).unwrap());
        verify_dummy(&password("anything"), HashScheme::Bcrypt);
    }

    #[test]
    fn test_debug_redaction() {
        let secret = password("hunter22");
        let debug_output = format!("{:?}", secret);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("hunter22"));

        let hashed = secret.hash().unwrap();
        let debug_output = format!("{:?}", hashed);
        assert!(!debug_output.contains(hashed.as_str()));
    }
}
