//! Investor type and composite score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite questionnaire score on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvestorScore(u8);

impl InvestorScore {
    /// Lowest possible score.
    pub const MIN: Self = Self(0);

    /// Highest possible score.
    pub const MAX: Self = Self(100);

    /// Creates a score, clamping to 100.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for InvestorScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Three-tier risk profile shown to the user after onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestorType {
    /// Prioritizes capital preservation
    Conservador,
    /// Balances growth and stability
    Moderado,
    /// Seeks growth and accepts volatility
    Agresivo,
}

impl InvestorType {
    /// Upper bound (inclusive) of the conservador band.
    pub const CONSERVADOR_MAX: u8 = 33;

    /// Upper bound (inclusive) of the moderado band.
    pub const MODERADO_MAX: u8 = 66;

    /// Determine type from a composite score
    /// - Conservador: score <= 33
    /// - Moderado: 33 < score <= 66
    /// - Agresivo: score > 66
    pub fn from_score(score: InvestorScore) -> Self {
        match score.value() {
            s if s <= Self::CONSERVADOR_MAX => Self::Conservador,
            s if s <= Self::MODERADO_MAX => Self::Moderado,
            _ => Self::Agresivo,
        }
    }

    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservador => "conservador",
            Self::Moderado => "moderado",
            Self::Agresivo => "agresivo",
        }
    }

    /// Short user-facing description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Conservador => {
                "Priorizas la seguridad de tu capital por encima de la rentabilidad."
            }
            Self::Moderado => "Buscas un equilibrio entre crecimiento y estabilidad.",
            Self::Agresivo => {
                "Buscas maximizar el crecimiento y aceptas una mayor volatilidad."
            }
        }
    }
}

impl fmt::Display for InvestorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
