//! Questionnaire snapshot consumed by the classifier.

use serde::{Deserialize, Serialize};

use super::answers::{Answer, InvestmentHorizon, KnowledgeLevel, RiskTolerance, ScoredAnswer};

/// Onboarding questionnaire answers for one user.
///
/// `None` means the question was not answered. The classifier never owns
/// this data; it reads a snapshot handed over by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireProfile {
    pub risk_tolerance: Option<Answer<RiskTolerance>>,
    pub investment_horizon: Option<Answer<InvestmentHorizon>>,
    pub knowledge_level: Option<Answer<KnowledgeLevel>>,
    /// Tri-state: yes / no / unknown
    pub has_emergency_fund: Option<bool>,
    pub questionnaire_completed: bool,
}

impl QuestionnaireProfile {
    /// Builds a profile from the raw free-text answers stored by onboarding.
    pub fn from_free_text(
        risk_tolerance: Option<&str>,
        investment_horizon: Option<&str>,
        knowledge_level: Option<&str>,
        has_emergency_fund: Option<bool>,
        questionnaire_completed: bool,
    ) -> Self {
        Self {
            risk_tolerance: risk_tolerance.and_then(RiskTolerance::from_answer),
            investment_horizon: investment_horizon.and_then(InvestmentHorizon::from_answer),
            knowledge_level: knowledge_level.and_then(KnowledgeLevel::from_answer),
            has_emergency_fund,
            questionnaire_completed,
        }
    }

    /// Builds a completed profile where every question has a recognized answer.
    pub fn completed(
        risk_tolerance: RiskTolerance,
        investment_horizon: InvestmentHorizon,
        knowledge_level: KnowledgeLevel,
        has_emergency_fund: bool,
    ) -> Self {
        Self {
            risk_tolerance: Some(Answer::Recognized(risk_tolerance)),
            investment_horizon: Some(Answer::Recognized(investment_horizon)),
            knowledge_level: Some(Answer::Recognized(knowledge_level)),
            has_emergency_fund: Some(has_emergency_fund),
            questionnaire_completed: true,
        }
    }

    /// Names of the questions left unanswered.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.risk_tolerance.is_none() {
            missing.push("risk_tolerance");
        }
        if self.investment_horizon.is_none() {
            missing.push("investment_horizon");
        }
        if self.knowledge_level.is_none() {
            missing.push("knowledge_level");
        }
        if self.has_emergency_fund.is_none() {
            missing.push("has_emergency_fund");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_free_text_normalizes_each_answer() {
        let profile = QuestionnaireProfile::from_free_text(
            Some("Moderado"),
            Some("Largo plazo (más de 5 años)"),
            Some("algo raro"),
            None,
            true,
        );

        assert_eq!(
            profile.risk_tolerance,
            Some(Answer::Recognized(RiskTolerance::Moderado))
        );
        assert_eq!(
            profile.investment_horizon,
            Some(Answer::Recognized(InvestmentHorizon::Largo))
        );
        assert_eq!(
            profile.knowledge_level,
            Some(Answer::Unrecognized("algo raro".to_string()))
        );
        assert_eq!(profile.has_emergency_fund, None);
    }

    #[test]
    fn missing_fields_lists_unanswered_questions() {
        let profile = QuestionnaireProfile::from_free_text(Some("agresivo"), None, Some(""), None, true);
        assert_eq!(
            profile.missing_fields(),
            vec!["investment_horizon", "knowledge_level", "has_emergency_fund"]
        );
    }

    #[test]
    fn completed_profile_has_no_missing_fields() {
        let profile = QuestionnaireProfile::completed(
            RiskTolerance::Conservador,
            InvestmentHorizon::Corto,
            KnowledgeLevel::Principiante,
            false,
        );
        assert!(profile.questionnaire_completed);
        assert!(profile.missing_fields().is_empty());
    }
}
