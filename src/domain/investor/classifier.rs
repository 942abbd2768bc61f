//! Weighted scoring of questionnaire answers.
//!
//! Each factor contributes `weight × sub-score`, sub-scores being 0, 50 or
//! 100. Weights are kept in whole percent so the arithmetic stays exact.
//!
//! An unanswered question contributes nothing: its weight is not
//! redistributed over the other factors, so gaps pull the score down.

use super::investor_type::{InvestorScore, InvestorType};
use super::profile::QuestionnaireProfile;

/// Weight of risk tolerance, in percent.
pub const RISK_TOLERANCE_WEIGHT: u32 = 40;
/// Weight of investment horizon, in percent.
pub const INVESTMENT_HORIZON_WEIGHT: u32 = 30;
/// Weight of knowledge level, in percent.
pub const KNOWLEDGE_LEVEL_WEIGHT: u32 = 20;
/// Weight of having an emergency fund, in percent.
pub const EMERGENCY_FUND_WEIGHT: u32 = 10;

/// Composite score for a completed questionnaire.
///
/// Returns `None` until the questionnaire is completed.
pub fn score(profile: &QuestionnaireProfile) -> Option<InvestorScore> {
    if !profile.questionnaire_completed {
        return None;
    }

    let mut weighted = 0u32;

    if let Some(answer) = &profile.risk_tolerance {
        weighted += RISK_TOLERANCE_WEIGHT * answer.sub_score();
    }
    if let Some(answer) = &profile.investment_horizon {
        weighted += INVESTMENT_HORIZON_WEIGHT * answer.sub_score();
    }
    if let Some(answer) = &profile.knowledge_level {
        weighted += KNOWLEDGE_LEVEL_WEIGHT * answer.sub_score();
    }
    if profile.has_emergency_fund == Some(true) {
        weighted += EMERGENCY_FUND_WEIGHT * 100;
    }

    // Weights sum to 100, so this is at most 100.
    let value = (weighted / 100).min(100) as u8;
    Some(InvestorScore::new(value))
}

/// Classifies the user, or `None` if the questionnaire is not completed yet.
pub fn classify(profile: &QuestionnaireProfile) -> Option<InvestorType> {
    score(profile).map(InvestorType::from_score)
}
