//! Request and response DTOs for investor profiling.

use serde::{Deserialize, Serialize};

use crate::domain::investor::{InvestorScore, InvestorType, QuestionnaireProfile};

/// Questionnaire answers as stored by onboarding, in free text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifyInvestorRequest {
    #[serde(default)]
    pub risk_tolerance: Option<String>,
    #[serde(default)]
    pub investment_horizon: Option<String>,
    #[serde(default)]
    pub knowledge_level: Option<String>,
    #[serde(default)]
    pub has_emergency_fund: Option<bool>,
    #[serde(default)]
    pub questionnaire_completed: bool,
}

impl ClassifyInvestorRequest {
    /// Normalize the free-text answers into a typed profile.
    pub fn to_profile(&self) -> QuestionnaireProfile {
        QuestionnaireProfile::from_free_text(
            self.risk_tolerance.as_deref(),
            self.investment_horizon.as_deref(),
            self.knowledge_level.as_deref(),
            self.has_emergency_fund,
            self.questionnaire_completed,
        )
    }
}

/// Classification result.
///
/// All optional fields are `null` while the questionnaire is incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyInvestorResponse {
    pub investor_type: Option<InvestorType>,
    pub score: Option<InvestorScore>,
    pub description: Option<String>,
    /// Questions left unanswered; they lowered the score.
    pub missing_fields: Vec<String>,
}

impl ClassifyInvestorResponse {
    pub fn from_profile(profile: &QuestionnaireProfile, score: Option<InvestorScore>) -> Self {
        let investor_type = score.map(InvestorType::from_score);
        Self {
            investor_type,
            score,
            description: investor_type.map(|t| t.description().to_string()),
            missing_fields: if score.is_some() {
                profile
                    .missing_fields()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            } else {
                Vec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_with_missing_fields() {
        let json = r#"{"risk_tolerance": "Agresivo", "questionnaire_completed": true}"#;
        let req: ClassifyInvestorRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.risk_tolerance.as_deref(), Some("Agresivo"));
        assert!(req.investment_horizon.is_none());
        assert!(req.has_emergency_fund.is_none());
        assert!(req.questionnaire_completed);
    }

    #[test]
    fn completion_flag_defaults_to_false() {
        let req: ClassifyInvestorRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.questionnaire_completed);
    }

    #[test]
    fn incomplete_response_serializes_nulls() {
        let profile = QuestionnaireProfile::default();
        let response = ClassifyInvestorResponse::from_profile(&profile, None);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["investor_type"], serde_json::Value::Null);
        assert_eq!(json["score"], serde_json::Value::Null);
        assert_eq!(json["missing_fields"], serde_json::json!([]));
    }

    #[test]
    fn complete_response_serializes_type_and_score() {
        let profile = QuestionnaireProfile {
            questionnaire_completed: true,
            ..Default::default()
        };
        let response = ClassifyInvestorResponse::from_profile(&profile, Some(InvestorScore::new(55)));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["investor_type"], "moderado");
        assert_eq!(json["score"], 55);
        assert_eq!(json["missing_fields"].as_array().unwrap().len(), 4);
    }
}
