//! In-Memory Repository Implementation
//!
//! Process-local store used by tests and local demos. Counts user lookups
//! and can simulate an unreachable database, for users and sessions alike.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{LoginError, LoginResult};

#[derive(Default)]
struct MemoryState {
    users: RwLock<Vec<User>>,
    sessions: RwLock<HashMap<Uuid, Session>>,
    user_lookups: AtomicUsize,
    database_down: AtomicBool,
}

/// In-memory login repository
#[derive(Clone, Default)]
pub struct MemoryLoginRepository {
    state: Arc<MemoryState>,
}

impl MemoryLoginRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: User) {
        self.state.users.write().await.push(user);
    }

    /// Number of user lookups issued so far
    pub fn user_lookups(&self) -> usize {
        self.state.user_lookups.load(Ordering::SeqCst)
    }

    /// Make every subsequent operation fail as if the pool timed out
    pub fn set_database_down(&self, down: bool) {
        self.state.database_down.store(down, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> LoginResult<()> {
        if self.state.database_down.load(Ordering::SeqCst) {
            return Err(LoginError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub async fn session_count(&self) -> usize {
        self.state.sessions.read().await.len()
    }
}

impl UserRepository for MemoryLoginRepository {
    async fn find_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> LoginResult<Option<User>> {
        self.state.user_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;

        let users = self.state.users.read().await;
        let mut matches = users
            .iter()
            .filter(|u| u.username == username_or_email || u.email == username_or_email);

        match (matches.next(), matches.next()) {
            (None, _) => Ok(None),
            (Some(user), None) => Ok(Some(user.clone())),
            (Some(first), Some(second)) => Err(LoginError::DataIntegrity(format!(
                "login identifier matches users {} and {}",
                first.id, second.id
            ))),
        }
    }
}

impl SessionRepository for MemoryLoginRepository {
    async fn create(&self, session: &Session) -> LoginResult<()> {
        self.check_reachable()?;
        self.state
            .sessions
            .write()
            .await
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> LoginResult<Option<Session>> {
        self.check_reachable()?;
        let sessions = self.state.sessions.read().await;
        Ok(sessions
            .get(&session_id)
            .filter(|s| !s.is_expired())
            .cloned())
    }

    async fn update(&self, session: &Session) -> LoginResult<()> {
        self.check_reachable()?;
        let mut sessions = self.state.sessions.write().await;
        if let Some(stored) = sessions.get_mut(&session.session_id) {
            *stored = session.clone();
        }
        Ok(())
    }

    async fn regenerate(&self, old_session_id: Uuid, session: &Session) -> LoginResult<()> {
        self.check_reachable()?;
        let mut sessions = self.state.sessions.write().await;
        sessions.remove(&old_session_id);
        sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> LoginResult<()> {
        self.check_reachable()?;
        self.state.sessions.write().await.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> LoginResult<u64> {
        self.check_reachable()?;
        let mut sessions = self.state.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        Ok((before - sessions.len()) as u64)
    }
}
