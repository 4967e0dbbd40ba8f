//! Submitted Credentials
//!
//! Sanitization for the identifier strips ASCII control characters and
//! surrounding whitespace. The password is kept byte-for-byte; it only has
//! to be non-empty.

use platform::password::ClearTextPassword;

use crate::error::{LoginError, LoginResult};

/// Username-or-email plus password, both present
#[derive(Debug)]
pub struct Credentials {
    username_or_email: String,
    password: ClearTextPassword,
}

impl Credentials {
    pub fn new(username_or_email: &str, password: String) -> LoginResult<Self> {
        let username_or_email: String = username_or_email
            .chars()
            .filter(|c| !c.is_ascii_control())
            .collect::<String>()
            .trim()
            .to_string();

        let password = ClearTextPassword::new(password);

        if username_or_email.is_empty() || password.is_empty() {
            return Err(LoginError::Validation);
        }

        Ok(Self {
            username_or_email,
            password,
        })
    }

    pub fn username_or_email(&self) -> &str {
        &self.username_or_email
    }

    pub fn password(&self) -> &ClearTextPassword {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let credentials = Credentials::new("  alice\u{0007} ", " pass word ".to_string()).unwrap();
        assert_eq!(credentials.username_or_email(), "alice");
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            Credentials::new("", "secret".to_string()),
            Err(LoginError::Validation)
        ));
        assert!(matches!(
            Credentials::new("alice", String::new()),
            Err(LoginError::Validation)
        ));
        assert!(matches!(
            Credentials::new(" \t\r\n ", "secret".to_string()),
            Err(LoginError::Validation)
        ));
    }
}
