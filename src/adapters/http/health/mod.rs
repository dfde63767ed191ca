//! HTTP adapters for health reporting

pub mod handlers;
pub mod routes;

pub use handlers::{CheckResponse, HealthResponse};
pub use routes::routes;
