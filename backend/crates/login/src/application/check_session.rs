//! Check Session Use Case
//!
//! Resolves the `esw_session` cookie value to a live server-side session.

use std::sync::Arc;

use crate::application::config::LoginConfig;
use crate::application::session_token::verify_session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::LoginResult;

/// Session status output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatusOutput {
    pub authenticated: bool,
    pub username: Option<String>,
}

/// Look up the session a cookie value points at
///
/// A missing cookie, a bad signature and an unknown or expired session all
/// yield `Ok(None)`. Only store failures are errors.
pub(crate) async fn load_session<S>(
    session_repo: &S,
    config: &LoginConfig,
    session_token: Option<&str>,
) -> LoginResult<Option<Session>>
where
    S: SessionRepository,
{
    let Some(session_id) =
        session_token.and_then(|token| verify_session_token(token, &config.session_secret))
    else {
        return Ok(None);
    };

    let session = session_repo.find_by_id(session_id).await?;
    Ok(session.filter(|s| !s.is_expired()))
}

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<LoginConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<LoginConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Get the session behind a cookie value, if any
    pub async fn load(&self, session_token: Option<&str>) -> LoginResult<Option<Session>> {
        load_session(self.session_repo.as_ref(), &self.config, session_token).await
    }

    /// Report whether the cookie belongs to a logged-in session
    pub async fn execute(&self, session_token: Option<&str>) -> LoginResult<SessionStatusOutput> {
        let user = self
            .load(session_token)
            .await?
            .and_then(|session| session.user);

        Ok(SessionStatusOutput {
            authenticated: user.is_some(),
            username: user.map(|u| u.username),
        })
    }
}
