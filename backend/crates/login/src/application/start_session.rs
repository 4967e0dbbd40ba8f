//! Start Session Use Case
//!
//! Runs whenever the login page is served: reuses the visitor's session or
//! starts a new one, and makes sure it carries a CSRF token.
//!
//! Sessions without a logged-in user get the short anonymous idle lifetime,
//! refreshed on every page load. The long lifetime is granted at sign-in.

use std::sync::Arc;

use crate::application::check_session::load_session;
use crate::application::config::LoginConfig;
use crate::application::session_token::sign_session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::LoginResult;

/// Start session output
pub struct StartSessionOutput {
    pub session: Session,
    /// A new session was created; the cookie must be (re)sent
    pub created: bool,
    /// Signed cookie value for `session`
    pub session_token: String,
}

/// Start session use case
pub struct StartSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<LoginConfig>,
}

impl<S> StartSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<LoginConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, session_token: Option<&str>) -> LoginResult<StartSessionOutput> {
        let existing = load_session(self.session_repo.as_ref(), &self.config, session_token).await?;

        let (session, created) = match existing {
            Some(mut session) => {
                let issued = session.issue_csrf_token();
                // Anonymous sessions live only as long as the visitor keeps coming back
                let touched = !session.is_authenticated();
                if touched {
                    session.touch(self.config.anonymous_session_ttl_ms());
                }
                if issued || touched {
                    self.session_repo.update(&session).await?;
                }
                (session, false)
            }
            None => {
                let mut session = Session::new(self.config.anonymous_session_ttl_ms());
                session.issue_csrf_token();
                self.session_repo.create(&session).await?;

                tracing::debug!(session_id = %session.session_id, "Session started");
                (session, true)
            }
        };

        let session_token = sign_session_token(session.session_id, &self.config.session_secret);

        Ok(StartSessionOutput {
            session,
            created,
            session_token,
        })
    }
}
