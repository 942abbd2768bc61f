//! HTTP handlers for investor profiling endpoints.

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::domain::investor;

use super::dto::{ClassifyInvestorRequest, ClassifyInvestorResponse};

/// POST /api/investor/classify - Classify questionnaire answers
pub async fn classify_investor(Json(req): Json<ClassifyInvestorRequest>) -> impl IntoResponse {
    let profile = req.to_profile();
    let score = investor::score(&profile);

    match score {
        Some(score) => {
            let missing = profile.missing_fields();
            if !missing.is_empty() {
                // Unanswered questions count as zero; see classifier docs
                tracing::debug!(?missing, %score, "classified with unanswered questions");
            }
        }
        None => tracing::debug!("questionnaire not completed; skipping classification"),
    }

    (
        StatusCode::OK,
        Json(ClassifyInvestorResponse::from_profile(&profile, score)),
    )
}
