//! Prompt construction for the completion service.
//!
//! Both prompts instruct the model to answer with one positive, one neutral
//! and one negative scenario; the parser copes when it does not comply.

/// Prompt for the first expansion of a freshly described situation.
pub fn initial_prompt(input: &str) -> String {
    format!(
        "Based on this input: \"{input}\", provide 3 possible scenarios that could happen. \
         One positive, one neutral, and one negative."
    )
}

/// Follow-up prompt for drilling into a chosen scenario.
///
/// Callers pass the cleaned scenario text so the model is not re-fed the
/// literal formatting markers.
pub fn follow_up_prompt(clean_scenario: &str) -> String {
    format!(
        "Given that this happened: \"{clean_scenario}\", what are 3 possible next outcomes? \
         One positive, one neutral, and one negative."
    )
}
