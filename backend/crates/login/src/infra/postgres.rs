//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    session::{Session, SessionUser},
    user::User,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{csrf_token::CsrfToken, user_id::UserId};
use crate::error::{LoginError, LoginResult};

/// PostgreSQL-backed login repository
#[derive(Clone)]
pub struct PgLoginRepository {
    pool: PgPool,
}

impl PgLoginRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgLoginRepository {
    async fn find_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> LoginResult<Option<User>> {
        // LIMIT 2 is enough to tell "exactly one" from "ambiguous"
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password
            FROM users
            WHERE username = $1 OR email = $1
            LIMIT 2
            "#,
        )
        .bind(username_or_email)
        .fetch_all(&self.pool)
        .await?;

        let mut rows = rows.into_iter();
        match (rows.next(), rows.next()) {
            (None, _) => Ok(None),
            (Some(row), None) => row.into_user().map(Some),
            (Some(first), Some(second)) => Err(LoginError::DataIntegrity(format!(
                "login identifier matches users {} and {}",
                first.id, second.id
            ))),
        }
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgLoginRepository {
    async fn create(&self, session: &Session) -> LoginResult<()> {
        let row = SessionRow::from_session(session);

        sqlx::query(
            r#"
            INSERT INTO esw_sessions (
                session_id,
                csrf_token,
                user_id,
                username,
                expires_at_ms,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(row.session_id)
        .bind(row.csrf_token)
        .bind(row.user_id)
        .bind(row.username)
        .bind(row.expires_at_ms)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> LoginResult<Option<Session>> {
        let now_ms = Utc::now().timestamp_millis();

        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                csrf_token,
                user_id,
                username,
                expires_at_ms,
                created_at
            FROM esw_sessions
            WHERE session_id = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(session_id)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn update(&self, session: &Session) -> LoginResult<()> {
        let row = SessionRow::from_session(session);

        sqlx::query(
            r#"
            UPDATE esw_sessions SET
                csrf_token = $2,
                user_id = $3,
                username = $4,
                expires_at_ms = $5
            WHERE session_id = $1
            "#,
        )
        .bind(row.session_id)
        .bind(row.csrf_token)
        .bind(row.user_id)
        .bind(row.username)
        .bind(row.expires_at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn regenerate(&self, old_session_id: Uuid, session: &Session) -> LoginResult<()> {
        let row = SessionRow::from_session(session);

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM esw_sessions WHERE session_id = $1")
            .bind(old_session_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO esw_sessions (
                session_id,
                csrf_token,
                user_id,
                username,
                expires_at_ms,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(row.session_id)
        .bind(row.csrf_token)
        .bind(row.user_id)
        .bind(row.username)
        .bind(row.expires_at_ms)
        .bind(row.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> LoginResult<()> {
        sqlx::query("DELETE FROM esw_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> LoginResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM esw_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password: String,
}

impl UserRow {
    fn into_user(self) -> LoginResult<User> {
        let password_hash = HashedPassword::from_stored(self.password)?;

        Ok(User {
            id: UserId::new(self.id),
            username: self.username,
            email: self.email,
            password_hash,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    csrf_token: Option<String>,
    user_id: Option<i64>,
    username: Option<String>,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.session_id,
            csrf_token: session.csrf_token.as_ref().map(|t| t.as_str().to_string()),
            user_id: session.user.as_ref().map(|u| u.user_id.as_i64()),
            username: session.user.as_ref().map(|u| u.username.clone()),
            expires_at_ms: session.expires_at_ms,
            created_at: session.created_at,
        }
    }

    fn into_session(self) -> Session {
        let csrf_token = self.csrf_token.and_then(|raw| {
            let token = CsrfToken::from_stored(raw);
            if token.is_none() {
                tracing::warn!(session_id = %self.session_id, "Discarding malformed stored CSRF token");
            }
            token
        });

        let user = match (self.user_id, self.username) {
            (Some(id), Some(username)) => Some(SessionUser {
                user_id: UserId::new(id),
                username,
            }),
            _ => None,
        };

        Session {
            session_id: self.session_id,
            csrf_token,
            user,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        }
    }
}
