//! Login Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::LoginConfig;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::infra::postgres::PgLoginRepository;
use crate::presentation::handlers::{self, LoginAppState};
use crate::presentation::page;

pub const LOGIN_PAGE_PATH: &str = "/login";
pub const LOGIN_SCRIPT_PATH: &str = "/assets/auth-login.js";
pub const LOGIN_API_PATH: &str = "/api/auth/login";
pub const LOGOUT_API_PATH: &str = "/api/auth/logout";
pub const STATUS_API_PATH: &str = "/api/auth/status";

/// Create the login router with PostgreSQL repository
pub fn login_router(repo: PgLoginRepository, config: LoginConfig) -> Router {
    login_router_generic(repo, config)
}

/// Create a generic login router for any repository implementation
pub fn login_router_generic<R>(repo: R, config: LoginConfig) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let state = LoginAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(LOGIN_PAGE_PATH, get(page::login_page::<R>))
        .route(LOGIN_SCRIPT_PATH, get(page::login_script))
        .route(LOGIN_API_PATH, post(handlers::login::<R>))
        .route(LOGOUT_API_PATH, post(handlers::logout::<R>))
        .route(STATUS_API_PATH, get(handlers::session_status::<R>))
        .with_state(state)
}
