//! # Erudio Service
//!
//! Application services for the Erudio REST API: versioned representations,
//! the entity-representation mapping tables, and the person, book, and
//! authentication use cases.

pub mod auth_service;
pub mod book_service;
pub mod dto;
pub mod mappers;
pub mod person_service;

pub use auth_service::*;
pub use book_service::BookService;
pub use dto::*;
pub use mappers::Mapping;
pub use person_service::PersonService;
