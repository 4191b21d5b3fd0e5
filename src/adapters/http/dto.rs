//! HTTP DTOs (Data Transfer Objects) for the path-exploration endpoints.
//!
//! These types define the JSON request/response structure and are the
//! boundary between HTTP and the application layer. The tree is serialized
//! as the same nested structure the render layer walks.

use serde::{Deserialize, Serialize};

use crate::application::SessionState;
use crate::domain::scenario::{Scenario, ScenarioType};
use crate::domain::tree::TreeNode;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to generate a fresh tree from a described situation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// The user's freeform description of their situation.
    pub input: String,
}

/// Request to expand the scenario the user clicked.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpandRequest {
    /// Id of the node whose scenario list was clicked.
    pub parent_node_id: String,
    /// Which of the three scenarios was clicked (0..=2).
    pub scenario_index: usize,
    /// The clicked scenario's raw text.
    pub scenario_text: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Snapshot of the session handed to the render layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    /// The current decision tree, absent before the first Generate.
    pub tree: Option<TreeNode>,
    /// Flat scenario list from the most recent successful expansion.
    pub scenarios: Vec<ScenarioDto>,
    /// Whether an expansion is in flight.
    pub loading: bool,
}

impl SessionResponse {
    /// Builds a snapshot from the controller's state.
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            tree: state.tree.clone(),
            scenarios: state.latest_scenarios.iter().map(ScenarioDto::from).collect(),
            loading: state.loading,
        }
    }
}

/// One flat scenario entry for immediate display.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioDto {
    /// Raw scenario text, markers included.
    pub text: String,
    /// Classification decided at parse time.
    pub scenario_type: ScenarioType,
}

impl From<&Scenario> for ScenarioDto {
    fn from(scenario: &Scenario) -> Self {
        Self {
            text: scenario.text.clone(),
            scenario_type: scenario.scenario_type,
        }
    }
}

/// Error payload, matching the original wire contract.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable failure indication.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
