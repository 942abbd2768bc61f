//! Investor profiling from the onboarding questionnaire.
//!
//! Converts questionnaire answers into one of three investor types
//! (conservador, moderado, agresivo) through a weighted score.
//!
//! # Usage
//!
//! ```
//! use finanwas::domain::investor::{classify, InvestorType, QuestionnaireProfile};
//!
//! let profile = QuestionnaireProfile::from_free_text(
//!     Some("Moderado"),
//!     Some("Mediano plazo (2-5 años)"),
//!     Some("Intermedio"),
//!     Some(true),
//!     true,
//! );
//! assert_eq!(classify(&profile), Some(InvestorType::Moderado));
//! ```

mod answers;
mod classifier;
mod investor_type;
mod profile;

pub use answers::{Answer, InvestmentHorizon, KnowledgeLevel, RiskTolerance, ScoredAnswer};
pub use classifier::{
    classify, score, EMERGENCY_FUND_WEIGHT, INVESTMENT_HORIZON_WEIGHT, KNOWLEDGE_LEVEL_WEIGHT,
    RISK_TOLERANCE_WEIGHT,
};
pub use investor_type::{InvestorScore, InvestorType};
pub use profile::QuestionnaireProfile;
