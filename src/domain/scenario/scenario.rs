//! Scenario value object.

use serde::{Deserialize, Serialize};

use super::parser;
use super::ScenarioType;

/// One typed outcome text recovered from a single completion.
///
/// The text is kept raw (formatting markers included) so the render layer can
/// display it exactly as generated; [`Scenario::clean_text`] produces the
/// marker-free form used for follow-up prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Raw scenario text, possibly tagged with a bold-delimited label.
    pub text: String,
    /// Classification decided at parse time; travels with the scenario so
    /// later steps never have to re-parse.
    pub scenario_type: ScenarioType,
}

impl Scenario {
    /// Creates a scenario with an explicit type.
    pub fn new(text: impl Into<String>, scenario_type: ScenarioType) -> Self {
        Self {
            text: text.into(),
            scenario_type,
        }
    }

    /// Creates an unclassified scenario.
    pub fn unclassified(text: impl Into<String>) -> Self {
        Self::new(text, ScenarioType::Unclassified)
    }

    /// Scenario text with the leading label and bold delimiters removed.
    pub fn clean_text(&self) -> String {
        parser::strip_formatting(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_carries_text_and_type() {
        let scenario = Scenario::new("**Positive**\nYou get the job", ScenarioType::Positive);
        assert_eq!(scenario.text, "**Positive**\nYou get the job");
        assert_eq!(scenario.scenario_type, ScenarioType::Positive);
    }

    #[test]
    fn unclassified_constructor_tags_unclassified() {
        let scenario = Scenario::unclassified("some paragraph");
        assert_eq!(scenario.scenario_type, ScenarioType::Unclassified);
    }

    #[test]
    fn clean_text_strips_label_and_markers() {
        let scenario = Scenario::new("**Negative**\nYou lose the offer", ScenarioType::Negative);
        assert_eq!(scenario.clean_text(), "You lose the offer");
    }
}
