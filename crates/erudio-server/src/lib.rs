//! # Erudio Server Library
//!
//! Wiring for the Erudio REST API server: building the application from
//! configuration and the startup log output.

pub mod app;
pub mod startup;
