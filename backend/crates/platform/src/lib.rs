//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (CSPRNG, hex tokens, HMAC, constant-time compare)
//! - Password hash verification (Argon2 PHC and bcrypt)
//! - Cookie management
//! - Database connection configuration

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod password;
