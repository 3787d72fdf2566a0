//! Custom Axum extractors.

mod body;
mod claims;
mod media;
mod pagination;

pub use body::*;
pub use claims::*;
pub use media::*;
pub use pagination::*;
