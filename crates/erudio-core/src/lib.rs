//! # Erudio Core
//!
//! Core types and error definitions shared by every Erudio crate:
//! the error taxonomy, pagination primitives, validation helpers,
//! and tracing initialisation.

pub mod error;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use error::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;
