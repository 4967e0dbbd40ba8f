//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod session_token;
pub mod sign_in;
pub mod sign_out;
pub mod start_session;

// Re-exports
pub use check_session::{CheckSessionUseCase, SessionStatusOutput};
pub use config::LoginConfig;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use start_session::{StartSessionOutput, StartSessionUseCase};
