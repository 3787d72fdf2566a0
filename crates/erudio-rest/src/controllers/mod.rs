//! REST API controllers.

pub mod auth_controller;
pub mod book_controller;
pub mod health_controller;
pub mod person_controller;

pub use health_controller::HealthResponse;
