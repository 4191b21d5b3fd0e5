//! Scenario classification.

use serde::{Deserialize, Serialize};

/// Classification of a generated outcome scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioType {
    /// Favorable outcome branch.
    Positive,
    /// Neither favorable nor unfavorable.
    Neutral,
    /// Unfavorable outcome branch.
    Negative,
    /// The root's original input, or text no label could be recovered from.
    Unclassified,
}

impl ScenarioType {
    /// The label literal used in tagged scenario text, if any.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ScenarioType::Positive => Some("Positive"),
            ScenarioType::Neutral => Some("Neutral"),
            ScenarioType::Negative => Some("Negative"),
            ScenarioType::Unclassified => None,
        }
    }

    /// Matches a label literal case-insensitively.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "positive" => ScenarioType::Positive,
            "neutral" => ScenarioType::Neutral,
            "negative" => ScenarioType::Negative,
            _ => ScenarioType::Unclassified,
        }
    }
}
