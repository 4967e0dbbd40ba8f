//! Login Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session and user entities, value objects, repository traits
//! - `application/` - Use cases (session start + CSRF issue, sign in, sign out)
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, login page, router
//!
//! ## Features
//! - Username or email + password sign in against a single `users` table
//! - Server-side sessions referenced by a signed `esw_session` cookie
//! - Per-session CSRF token, mirrored into the login page
//!
//! ## Security Model
//! - CSRF tokens are compared in constant time
//! - Unknown user and wrong password are indistinguishable to the client
//! - Session identifier is regenerated on login (fixation resistance)
//! - Infrastructure failures are logged server-side, never echoed

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LoginConfig;
pub use error::{LoginError, LoginResult};
pub use infra::memory::MemoryLoginRepository;
pub use infra::postgres::PgLoginRepository;
pub use presentation::router::{login_router, login_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::{
        session::{Session, SessionUser},
        user::User,
    };
    pub use crate::domain::value_object::{
        credentials::Credentials, csrf_token::CsrfToken, user_id::UserId,
    };
    pub use crate::presentation::dto::*;
}
