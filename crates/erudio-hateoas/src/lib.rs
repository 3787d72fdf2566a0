//! # Erudio HATEOAS
//!
//! Hypermedia support for representations:
//!
//! - [`Link`] and [`LinkBuilder`] produce absolute link targets without reflection.
//! - [`PagedModelBuilder`] wraps a page of representations with per-item `self`
//!   links, navigation links, and page metadata.
//! - [`hal`] renders items and envelopes in HAL JSON.

pub mod envelope;
pub mod hal;
pub mod link;
pub mod representation;

pub use envelope::{PageMetadata, PagedModel, PagedModelBuilder};
pub use link::{rel, Link, LinkBuilder};
pub use representation::Representation;
