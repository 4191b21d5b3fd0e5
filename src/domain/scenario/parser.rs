//! Scenario-text parsing protocol.
//!
//! The completion service is instructed to emit three sections tagged
//! `**Positive**`, `**Neutral**` and `**Negative**`, but compliance is not
//! guaranteed: extra prose, missing labels and reordered sections all occur
//! in practice. Parsing therefore degrades through an ordered fallback chain
//! instead of failing the expansion, and never returns an error.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Scenario, ScenarioType};

/// Paragraphs whose trimmed length does not exceed this are ignored by the
/// paragraph fallback.
const MIN_PARAGRAPH_LEN: usize = 50;

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\*\*(positive|neutral|negative)\*\*").expect("marker pattern is valid")
});

static LEADING_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\*\*(positive|neutral|negative)\*\*[ \t]*\r?\n?")
        .expect("leading label pattern is valid")
});

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("paragraph break pattern is valid"));

/// Splits one raw completion into exactly three typed scenarios.
///
/// Ordered fallback chain, first success wins:
/// 1. split on the tagged `**Positive**`/`**Neutral**`/`**Negative**` markers
/// 2. split on blank-line boundaries, keeping substantial paragraphs
/// 3. degenerate: the raw text plus two empty scenarios
pub fn parse(raw: &str) -> [Scenario; 3] {
    if let Some(scenarios) = tagged_split(raw) {
        return scenarios;
    }
    if let Some(scenarios) = paragraph_split(raw) {
        return scenarios;
    }
    [
        Scenario::unclassified(raw),
        Scenario::unclassified(""),
        Scenario::unclassified(""),
    ]
}

/// Detects which bold-delimited label literal is present in the text.
///
/// Used when a type was not already decided at parse time.
pub fn classify(text: &str) -> ScenarioType {
    MARKER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(ScenarioType::Unclassified, |label| {
            ScenarioType::from_label(label.as_str())
        })
}

/// Removes a single leading label line and all bold delimiters, then trims.
///
/// Follow-up prompts are built from this form so the model is not re-fed the
/// literal formatting markers.
pub fn strip_formatting(text: &str) -> String {
    let without_label = LEADING_LABEL.replace(text.trim(), "");
    without_label.replace("**", "").trim().to_string()
}

/// Recovers (label, body) sections from the tagged format.
///
/// A section's body runs from the end of its marker to the start of the next
/// one; labels outside the three literals (e.g. `**Action**`) stay inside the
/// enclosing body. Exactly three sections with non-empty trimmed bodies are
/// required, reconstructed with their label re-prefixed in the same delimiter
/// form.
fn tagged_split(raw: &str) -> Option<[Scenario; 3]> {
    let mut marks = Vec::new();
    for caps in MARKER.captures_iter(raw) {
        if let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) {
            marks.push((whole.start(), whole.end(), label.as_str()));
        }
    }

    let mut sections = Vec::new();
    for (i, &(_, body_start, label)) in marks.iter().enumerate() {
        let body_end = marks
            .get(i + 1)
            .map_or(raw.len(), |&(next_start, _, _)| next_start);
        let body = raw[body_start..body_end].trim();
        if body.is_empty() {
            continue;
        }
        sections.push(Scenario::new(
            format!("**{label}**\n{body}"),
            ScenarioType::from_label(label),
        ));
    }

    <[Scenario; 3]>::try_from(sections).ok()
}

/// Falls back to blank-line paragraphs when no usable tags were found.
fn paragraph_split(raw: &str) -> Option<[Scenario; 3]> {
    let mut paragraphs = PARAGRAPH_BREAK
        .split(raw)
        .map(str::trim)
        .filter(|p| p.len() > MIN_PARAGRAPH_LEN);

    Some([
        Scenario::unclassified(paragraphs.next()?),
        Scenario::unclassified(paragraphs.next()?),
        Scenario::unclassified(paragraphs.next()?),
    ])
}
