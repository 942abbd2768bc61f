//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure;
//! [`router::app_router`] mounts them under one application router.

pub mod client_identifier;
pub mod dto;
pub mod investor;
pub mod middleware;
pub mod rate_limit;
pub mod router;

pub use investor::investor_routes;
pub use rate_limit::rate_limit_routes;
pub use router::{app_router, AppState};
