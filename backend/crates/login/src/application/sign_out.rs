//! Sign Out Use Case
//!
//! Destroys the visitor's session. Requires the session's CSRF token.

use std::sync::Arc;

use crate::application::check_session::load_session;
use crate::application::config::LoginConfig;
use crate::domain::repository::SessionRepository;
use crate::error::{LoginError, LoginResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<LoginConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<LoginConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Sign out from current session
    ///
    /// Returns the login page location for the client redirect.
    pub async fn execute(
        &self,
        session_token: Option<&str>,
        csrf_token: Option<&str>,
    ) -> LoginResult<String> {
        let session = load_session(self.session_repo.as_ref(), &self.config, session_token)
            .await?
            .filter(|session| session.verify_csrf_token(csrf_token))
            .ok_or(LoginError::Csrf)?;

        self.session_repo.delete(session.session_id).await?;

        tracing::info!(session_id = %session.session_id, "User signed out");
        Ok(self.config.login_url.clone())
    }
}
