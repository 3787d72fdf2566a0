//! # Erudio Security
//!
//! Bearer token issuance and validation (HS256 JWT) and Argon2 password
//! hashing.

pub mod jwt;
pub mod password;

pub use jwt::*;
pub use password::*;
