//! # Erudio Domain
//!
//! Persisted records served by the API: people, books, and the
//! accounts allowed to sign in.

pub mod book;
pub mod person;
pub mod user;

pub use book::Book;
pub use person::Person;
pub use user::{Permission, User};
