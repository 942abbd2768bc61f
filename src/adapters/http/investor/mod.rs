//! HTTP adapter for investor profiling.
//!
//! - `POST /api/investor/classify` - Classify questionnaire answers

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ClassifyInvestorRequest, ClassifyInvestorResponse};
pub use routes::investor_routes;
