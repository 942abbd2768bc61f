//! HTTP adapter for quota inspection.
//!
//! - `GET /api/rate-limit/:endpoint` - Remaining quota for the caller

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::QuotaResponse;
pub use handlers::QuotaState;
pub use routes::rate_limit_routes;
