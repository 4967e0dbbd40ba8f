//! Value Object Module

pub mod credentials;
pub mod csrf_token;
pub mod user_id;
