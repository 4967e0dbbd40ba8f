//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::{extract_cookie, set_cookie_header};

use crate::application::config::LoginConfig;
use crate::application::{CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::LoginResult;
use crate::presentation::dto::{LoginRequest, LoginResponse, LogoutRequest, SessionStatusResponse};

/// Message returned with a successful login
pub const LOGIN_SUCCESS_MESSAGE: &str = "Successful login";

/// Message returned with a successful logout
pub const LOGOUT_SUCCESS_MESSAGE: &str = "Successfully logged out";

/// Shared state for login handlers
#[derive(Clone)]
pub struct LoginAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<LoginConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<LoginAppState<R>>,
    headers: HeaderMap,
    form: Result<Form<LoginRequest>, FormRejection>,
) -> LoginResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    // An unreadable body carries no credentials
    let req = match form {
        Ok(Form(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable login form");
            LoginRequest::default()
        }
    };

    let session_token = extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignInInput {
        username_or_email: req.username_or_email,
        password: req.password,
        csrf_token: req.csrf_token,
    };

    let output = use_case.execute(input, session_token.as_deref()).await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
        Json(LoginResponse::success(LOGIN_SUCCESS_MESSAGE, output.redirect)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<LoginAppState<R>>,
    headers: HeaderMap,
    form: Result<Form<LogoutRequest>, FormRejection>,
) -> LoginResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let req = form.map(|Form(req)| req).unwrap_or_default();
    let session_token = extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
    let redirect = use_case
        .execute(session_token.as_deref(), req.csrf_token.as_deref())
        .await?;

    let cookie = state.config.session_cookie().build_delete_cookie();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
        Json(LoginResponse::success(LOGOUT_SUCCESS_MESSAGE, redirect)),
    ))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R>(
    State(state): State<LoginAppState<R>>,
    headers: HeaderMap,
) -> LoginResult<Json<SessionStatusResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let session_token = extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let status = use_case.execute(session_token.as_deref()).await?;

    Ok(Json(SessionStatusResponse {
        authenticated: status.authenticated,
        username: status.username,
    }))
}
