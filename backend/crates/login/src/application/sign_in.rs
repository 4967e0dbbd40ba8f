//! Sign In Use Case
//!
//! Authenticates a username-or-email + password pair and upgrades the
//! visitor's session.
//!
//! Checks run in a fixed order and the first failure ends the request:
//! 1. both credential fields present
//! 2. CSRF token matches the session
//! 3. user lookup (store errors surface here)
//! 4. password verification
//!
//! Nothing touches the users table before step 3.

use std::sync::Arc;

use crate::application::check_session::load_session;
use crate::application::config::LoginConfig;
use crate::application::session_token::sign_session_token;
use crate::domain::entity::session::{Session, SessionUser};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::credentials::Credentials;
use crate::error::{LoginError, LoginResult};

/// Sign in input
pub struct SignInInput {
    /// User name or email
    pub username_or_email: String,
    /// Password
    pub password: String,
    /// Echo of the token embedded in the login page
    pub csrf_token: Option<String>,
}

/// Sign in output
pub struct SignInOutput {
    /// The regenerated, authenticated session
    pub session: Session,
    /// Session token for cookie
    pub session_token: String,
    /// Where the client should go next
    pub redirect: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<LoginConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<LoginConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        session_token: Option<&str>,
    ) -> LoginResult<SignInOutput> {
        let credentials = Credentials::new(&input.username_or_email, input.password)?;

        // No session means no stored token to compare against
        let session = load_session(self.session_repo.as_ref(), &self.config, session_token)
            .await?
            .filter(|session| session.verify_csrf_token(input.csrf_token.as_deref()))
            .ok_or(LoginError::Csrf)?;

        let user = match self
            .user_repo
            .find_by_username_or_email(credentials.username_or_email())
            .await?
        {
            Some(user) => user,
            None => {
                platform::password::verify_dummy(
                    credentials.password(),
                    self.config.dummy_hash_scheme,
                );
                return Err(LoginError::InvalidCredentials);
            }
        };

        if !user.verify_password(credentials.password())? {
            return Err(LoginError::InvalidCredentials);
        }

        if user.password_hash.needs_rehash() {
            tracing::debug!(user_id = %user.id, "Stored password hash uses a legacy scheme");
        }

        // Fixation defence: the authenticated session never reuses the old id
        let mut regenerated = session.regenerate(self.config.session_lifetime_ms());
        regenerated.authenticate(SessionUser {
            user_id: user.id,
            username: user.username.clone(),
        });

        self.session_repo
            .regenerate(session.session_id, &regenerated)
            .await?;

        let session_token = sign_session_token(regenerated.session_id, &self.config.session_secret);

        tracing::info!(
            user_id = %user.id,
            session_id = %regenerated.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            session: regenerated,
            session_token,
            redirect: self.config.home_url.clone(),
        })
    }
}
