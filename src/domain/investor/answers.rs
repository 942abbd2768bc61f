//! Typed questionnaire answers.
//!
//! The onboarding questionnaire stores answers as Spanish free text
//! ("Mediano plazo (2-5 años)", "Soy principiante"...). Those strings are
//! normalized here, at the boundary, so the scorer only ever sees enums.

use serde::{Deserialize, Serialize};

/// A questionnaire answer after normalization.
///
/// Text that matches none of the category keywords is kept verbatim as
/// `Unrecognized`; each factor decides what an unrecognized answer is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer<T> {
    Recognized(T),
    Unrecognized(String),
}

impl<T: ScoredAnswer> Answer<T> {
    /// Sub-score in {0, 50, 100} for this answer.
    pub fn sub_score(&self) -> u32 {
        match self {
            Answer::Recognized(value) => value.sub_score(),
            Answer::Unrecognized(_) => T::UNRECOGNIZED_SUB_SCORE,
        }
    }

    /// Returns the recognized value, if any.
    pub fn recognized(&self) -> Option<&T> {
        match self {
            Answer::Recognized(value) => Some(value),
            Answer::Unrecognized(_) => None,
        }
    }
}

/// A categorical answer that maps onto the 0/50/100 scoring scale.
pub trait ScoredAnswer: Sized + Copy {
    /// Sub-score used when the text matched no keyword.
    const UNRECOGNIZED_SUB_SCORE: u32;

    /// Keywords checked low to high; first containment match wins.
    const KEYWORDS: [(&'static str, Self); 3];

    /// Sub-score for a recognized value.
    fn sub_score(&self) -> u32;

    /// Normalizes free text into an answer.
    ///
    /// Matching is case-insensitive substring containment. Blank text
    /// yields `None` so the field is treated as unanswered.
    fn from_answer(text: &str) -> Option<Answer<Self>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();
        let answer = Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, value)| Answer::Recognized(*value))
            .unwrap_or_else(|| Answer::Unrecognized(trimmed.to_string()));
        Some(answer)
    }
}

/// How much volatility the user accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservador,
    Moderado,
    Agresivo,
}

impl ScoredAnswer for RiskTolerance {
    const UNRECOGNIZED_SUB_SCORE: u32 = 50;

    const KEYWORDS: [(&'static str, Self); 3] = [
        ("conservador", Self::Conservador),
        ("moderado", Self::Moderado),
        ("agresivo", Self::Agresivo),
    ];

    fn sub_score(&self) -> u32 {
        match self {
            Self::Conservador => 0,
            Self::Moderado => 50,
            Self::Agresivo => 100,
        }
    }
}

/// How long the user plans to keep money invested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentHorizon {
    /// Under one year
    Corto,
    Mediano,
    Largo,
}

impl ScoredAnswer for InvestmentHorizon {
    const UNRECOGNIZED_SUB_SCORE: u32 = 50;

    const KEYWORDS: [(&'static str, Self); 3] = [
        ("corto", Self::Corto),
        ("mediano", Self::Mediano),
        ("largo", Self::Largo),
    ];

    fn sub_score(&self) -> u32 {
        match self {
            Self::Corto => 0,
            Self::Mediano => 50,
            Self::Largo => 100,
        }
    }
}

/// Self-reported financial knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeLevel {
    Principiante,
    Intermedio,
    Avanzado,
}

impl ScoredAnswer for KnowledgeLevel {
    const UNRECOGNIZED_SUB_SCORE: u32 = 0;

    const KEYWORDS: [(&'static str, Self); 3] = [
        ("principiante", Self::Principiante),
        ("intermedio", Self::Intermedio),
        ("avanzado", Self::Avanzado),
    ];

    fn sub_score(&self) -> u32 {
        match self {
            Self::Principiante => 0,
            Self::Intermedio => 50,
            Self::Avanzado => 100,
        }
    }
}
