//! Presentation Layer
//!
//! HTTP handlers, DTOs, the login page and the router.

pub mod dto;
pub mod handlers;
pub mod page;
pub mod router;

pub use handlers::LoginAppState;
pub use router::{login_router, login_router_generic};
