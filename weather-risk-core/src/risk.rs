use serde::{Deserialize, Serialize};

/// Risk categories, in the order every response lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    VeryHot,
    VeryCold,
    VeryWindy,
    VeryWet,
    VeryUncomfortable,
}

impl RiskCategory {
    pub const COUNT: usize = 5;

    pub const fn all() -> &'static [RiskCategory; RiskCategory::COUNT] {
        &[
            RiskCategory::VeryHot,
            RiskCategory::VeryCold,
            RiskCategory::VeryWindy,
            RiskCategory::VeryWet,
            RiskCategory::VeryUncomfortable,
        ]
    }

    /// Position in [`RiskCategory::all`].
    pub const fn index(self) -> usize {
        match self {
            RiskCategory::VeryHot => 0,
            RiskCategory::VeryCold => 1,
            RiskCategory::VeryWindy => 2,
            RiskCategory::VeryWet => 3,
            RiskCategory::VeryUncomfortable => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskCategory::VeryHot => "very_hot",
            RiskCategory::VeryCold => "very_cold",
            RiskCategory::VeryWindy => "very_windy",
            RiskCategory::VeryWet => "very_wet",
            RiskCategory::VeryUncomfortable => "very_uncomfortable",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::VeryHot => "Very Hot",
            RiskCategory::VeryCold => "Very Cold",
            RiskCategory::VeryWindy => "Very Windy",
            RiskCategory::VeryWet => "Very Wet",
            RiskCategory::VeryUncomfortable => "Very Uncomfortable",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RiskCategory::VeryHot => "🌡️",
            RiskCategory::VeryCold => "❄️",
            RiskCategory::VeryWindy => "💨",
            RiskCategory::VeryWet => "🌧️",
            RiskCategory::VeryUncomfortable => "😰",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
