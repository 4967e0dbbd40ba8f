//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::error::LoginResult;

/// Credential store (read-only)
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find the single user whose username or email equals the input
    ///
    /// More than one matching row is a data-integrity error, never a silent pick.
    async fn find_by_username_or_email(&self, username_or_email: &str)
    -> LoginResult<Option<User>>;
}

/// Session store
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> LoginResult<()>;

    /// Find a session by ID; expired sessions are not returned
    async fn find_by_id(&self, session_id: Uuid) -> LoginResult<Option<Session>>;

    /// Persist changes to an existing session
    async fn update(&self, session: &Session) -> LoginResult<()>;

    /// Replace `old_session_id` with `session` atomically
    async fn regenerate(&self, old_session_id: Uuid, session: &Session) -> LoginResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: Uuid) -> LoginResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> LoginResult<u64>;
}
