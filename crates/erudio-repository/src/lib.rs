//! # Erudio Repository
//!
//! Data access for people, books, and user accounts.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn PersonRepository>   (traits.rs)
//! MySqlPersonRepository            (mysql/, SQLx)
//! InMemoryPersonRepository         (memory.rs, local runs and tests)
//! ```
//!
//! [`Repositories`] picks one set of implementations from configuration.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod registry;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use registry::Repositories;
pub use traits::*;
