//! Scenario texts and the parsing protocol that recovers them from raw
//! completions.

mod parser;
mod scenario;
mod scenario_type;

pub use parser::{classify, parse, strip_formatting};
pub use scenario::Scenario;
pub use scenario_type::ScenarioType;
