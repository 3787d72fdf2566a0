//! HTTP middleware.

mod auth;
mod errors;
mod logging;

pub use auth::*;
pub use errors::*;
pub use logging::*;
