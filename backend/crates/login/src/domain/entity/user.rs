//! User Entity
//!
//! A row of the `users` table. Read-only from the login flow.

use platform::password::{ClearTextPassword, HashedPassword};

use crate::domain::value_object::user_id::UserId;
use crate::error::LoginResult;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Salted one-way hash (`password` column)
    pub password_hash: HashedPassword,
}

impl User {
    /// Check a submitted password against the stored hash
    ///
    /// A mismatch is `Ok(false)`; an unusable stored hash is an error.
    pub fn verify_password(&self, password: &ClearTextPassword) -> LoginResult<bool> {
        Ok(self.password_hash.verify(password)?)
    }
}
