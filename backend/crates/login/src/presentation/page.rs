//! Login Page
//!
//! Server-rendered form plus its client script. The CSRF token reaches the
//! browser only through the `data-csrf-token` attribute of `#app`.

use askama::Template;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{Html, IntoResponse, Response};

use platform::cookie::{extract_cookie, set_cookie_header};

use crate::application::StartSessionUseCase;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::LoginResult;
use crate::presentation::handlers::LoginAppState;
use crate::presentation::router::{LOGIN_API_PATH, LOGIN_SCRIPT_PATH};

/// Client script served at `LOGIN_SCRIPT_PATH`
pub const LOGIN_SCRIPT: &str = include_str!("../../assets/auth-login.js");

#[derive(Template)]
#[template(path = "login.html")]
struct LoginPageTemplate<'a> {
    csrf_token: &'a str,
    login_endpoint: &'a str,
    script_src: &'a str,
}

/// GET /login
pub async fn login_page<R>(
    State(state): State<LoginAppState<R>>,
    headers: HeaderMap,
) -> LoginResult<Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let session_token = extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = StartSessionUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(session_token.as_deref()).await?;

    // A freshly issued session always carries a token
    let csrf_token = output
        .session
        .csrf_token
        .as_ref()
        .map(|token| token.as_str())
        .unwrap_or_default();

    let body = LoginPageTemplate {
        csrf_token,
        login_endpoint: LOGIN_API_PATH,
        script_src: LOGIN_SCRIPT_PATH,
    }
    .render()?;

    let mut response = Html(body).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    if output.created {
        let cookie = state
            .config
            .session_cookie()
            .build_set_cookie(&output.session_token);
        response
            .headers_mut()
            .insert(header::SET_COOKIE, set_cookie_header(&cookie));
    }

    Ok(response)
}

/// GET /assets/auth-login.js
pub async fn login_script() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/javascript; charset=utf-8"),
        )],
        LOGIN_SCRIPT,
    )
}
