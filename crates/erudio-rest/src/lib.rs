//! # Erudio REST
//!
//! HTTP layer of the Erudio REST API built on Axum: versioned person and
//! book endpoints, token sign-in, health checks, and content negotiation
//! between JSON (HAL), XML, and YAML.

pub mod controllers;
pub mod extractors;
pub mod media;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use media::MediaType;
pub use router::*;
pub use state::*;
