//! Session controller - orchestrates one "expand" cycle.
//!
//! The controller owns the whole session state and is the only writer of it.
//! One expand cycle: build a prompt, invoke the completion service, parse the
//! result, attach the three scenarios under the target node, commit. State is
//! only committed on success, so a failed cycle leaves the tree, the flat
//! scenario list and the selection exactly as they were.

use std::sync::Arc;

use crate::domain::foundation::NodeId;
use crate::domain::scenario::{parse, strip_formatting, Scenario};
use crate::domain::tree::{attach_children, create_root, find_node, select_node, TreeNode};
use crate::ports::{CompletionError, CompletionRequest, CompletionService};

use super::prompts;

/// The three pieces of session state, updated only by committed expansions.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The explorable decision tree, absent until the first Generate.
    pub tree: Option<TreeNode>,
    /// Flat scenario list from the most recent successful expansion, for
    /// immediate display before the user drills further.
    pub latest_scenarios: Vec<Scenario>,
    /// True while a completion request is in flight. The render layer must
    /// disable expand triggers while set.
    pub loading: bool,
}

/// Why an expansion was skipped without touching the tree.
///
/// Skips are not errors: they are absorbed locally to keep the tree
/// consistent, and typed so tests can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Prompt text was blank.
    EmptyPrompt,
    /// No tree exists yet, or the target id is not in it.
    UnknownTarget,
    /// The target already has children; expansion is terminal per node.
    AlreadyExpanded,
}

/// Outcome of one expansion attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// Children were attached and the session state committed.
    Expanded,
    /// Nothing changed.
    Skipped(SkipReason),
}

/// Errors surfaced to the caller.
///
/// Only completion failures propagate; malformed completions are absorbed by
/// the parser fallback chain and everything else becomes a typed skip.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    /// The completion service call failed. No retry is attempted.
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),
}

/// Owns the session state and drives expansions against a completion service.
pub struct SessionController<S: CompletionService + ?Sized> {
    completion: Arc<S>,
    state: SessionState,
}

impl<S: CompletionService + ?Sized> SessionController<S> {
    /// Creates a controller with an empty session.
    pub fn new(completion: Arc<S>) -> Self {
        Self {
            completion,
            state: SessionState::default(),
        }
    }

    /// Read-only view of the current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current tree snapshot, if a Generate has happened.
    pub fn tree(&self) -> Option<&TreeNode> {
        self.state.tree.as_ref()
    }

    /// Starts a fresh tree from the user's original input and expands its
    /// root.
    ///
    /// Any prior tree is replaced once the expansion succeeds; a failed
    /// completion leaves the previous session untouched.
    pub async fn expand_from_root(&mut self, input: &str) -> Result<ExpandOutcome, ExpandError> {
        if input.trim().is_empty() {
            return Ok(ExpandOutcome::Skipped(SkipReason::EmptyPrompt));
        }
        let root = create_root(input);
        let prompt = prompts::initial_prompt(input);
        self.expand_snapshot(root, &NodeId::root(), &prompt).await
    }

    /// Drills into the scenario at `index` under `parent`: marks the derived
    /// child id as part of the active path, then expands it with a follow-up
    /// prompt built from the cleaned scenario text.
    pub async fn expand_from_scenario(
        &mut self,
        parent: &NodeId,
        index: usize,
        scenario_text: &str,
    ) -> Result<ExpandOutcome, ExpandError> {
        let Some(current) = self.state.tree.clone() else {
            return Ok(ExpandOutcome::Skipped(SkipReason::UnknownTarget));
        };
        let child = parent.child(index);
        let selected = select_node(&current, &child);
        let prompt = prompts::follow_up_prompt(&strip_formatting(scenario_text));
        self.expand_snapshot(selected, &child, &prompt).await
    }

    /// Expands `target` in the current tree with `prompt`.
    pub async fn expand(
        &mut self,
        target: &NodeId,
        prompt: &str,
    ) -> Result<ExpandOutcome, ExpandError> {
        let Some(current) = self.state.tree.clone() else {
            return Ok(ExpandOutcome::Skipped(SkipReason::UnknownTarget));
        };
        self.expand_snapshot(current, target, prompt).await
    }

    /// One expand cycle against a captured tree snapshot: guard, call the
    /// completion service, parse, attach, commit.
    async fn expand_snapshot(
        &mut self,
        snapshot: TreeNode,
        target: &NodeId,
        prompt: &str,
    ) -> Result<ExpandOutcome, ExpandError> {
        if prompt.trim().is_empty() {
            return Ok(ExpandOutcome::Skipped(SkipReason::EmptyPrompt));
        }
        match find_node(&snapshot, target) {
            None => return Ok(ExpandOutcome::Skipped(SkipReason::UnknownTarget)),
            Some(node) if node.is_expanded() => {
                return Ok(ExpandOutcome::Skipped(SkipReason::AlreadyExpanded));
            }
            Some(_) => {}
        }

        self.state.loading = true;
        let result = self
            .completion
            .complete(CompletionRequest::new(prompt))
            .await;
        self.state.loading = false;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(target_id = %target, error = %err, "expansion failed");
                return Err(err.into());
            }
        };
        tracing::debug!(target_id = %target, model = %response.model, "completion received");

        let scenarios = parse(&response.content);
        self.state.tree = Some(attach_children(&snapshot, target, &scenarios));
        self.state.latest_scenarios = scenarios.to_vec();
        Ok(ExpandOutcome::Expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockCompletionService, MockError};
    use crate::domain::scenario::ScenarioType;

    const TAGGED: &str = "**Positive**\ngood things happen\n**Neutral**\nnothing much changes\n**Negative**\nbad things happen";

    fn controller(mock: MockCompletionService) -> SessionController<MockCompletionService> {
        SessionController::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn expand_from_root_builds_tree_with_three_typed_children() {
        let mock = MockCompletionService::new().with_response(TAGGED);
        let mut session = controller(mock);

        let outcome = session.expand_from_root("I might quit my job").await.unwrap();
        assert_eq!(outcome, ExpandOutcome::Expanded);

        let tree = session.tree().unwrap();
        assert_eq!(tree.id, NodeId::root());
        assert!(tree.is_selected);
        assert_eq!(tree.children.len(), 3);
        assert_eq!(tree.children[0].scenario_type, ScenarioType::Positive);
        assert_eq!(tree.children[1].scenario_type, ScenarioType::Neutral);
        assert_eq!(tree.children[2].scenario_type, ScenarioType::Negative);
        assert_eq!(session.state().latest_scenarios.len(), 3);
        assert!(!session.state().loading);
    }

    #[tokio::test]
    async fn blank_input_is_skipped_without_calling_the_service() {
        let mock = MockCompletionService::new().with_response(TAGGED);
        let mut session = controller(mock.clone());

        let outcome = session.expand_from_root("   \n  ").await.unwrap();

        assert_eq!(outcome, ExpandOutcome::Skipped(SkipReason::EmptyPrompt));
        assert!(session.tree().is_none());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_completion_leaves_session_unchanged() {
        let mock = MockCompletionService::new()
            .with_response(TAGGED)
            .with_error(MockError::Unavailable {
                message: "down".to_string(),
            });
        let mut session = controller(mock);

        session.expand_from_root("a situation").await.unwrap();
        let before = session.state().clone();

        let child_text = before.latest_scenarios[0].text.clone();
        let result = session
            .expand_from_scenario(&NodeId::root(), 0, &child_text)
            .await;

        assert!(matches!(result, Err(ExpandError::Completion(_))));
        assert_eq!(session.tree(), before.tree.as_ref());
        assert_eq!(session.state().latest_scenarios, before.latest_scenarios);
        assert!(!session.state().loading);
    }

    #[tokio::test]
    async fn expand_without_a_tree_is_skipped() {
        let mock = MockCompletionService::new().with_response(TAGGED);
        let mut session = controller(mock.clone());

        let outcome = session
            .expand(&NodeId::root(), "some prompt")
            .await
            .unwrap();

        assert_eq!(outcome, ExpandOutcome::Skipped(SkipReason::UnknownTarget));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn expand_with_unknown_target_is_skipped() {
        let mock = MockCompletionService::new()
            .with_response(TAGGED)
            .with_response(TAGGED);
        let mut session = controller(mock.clone());
        session.expand_from_root("a situation").await.unwrap();

        let outcome = session
            .expand(&NodeId::new("root-9"), "some prompt")
            .await
            .unwrap();

        assert_eq!(outcome, ExpandOutcome::Skipped(SkipReason::UnknownTarget));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn re_expanding_an_expanded_node_is_skipped() {
        let mock = MockCompletionService::new()
            .with_response(TAGGED)
            .with_response(TAGGED);
        let mut session = controller(mock.clone());
        session.expand_from_root("a situation").await.unwrap();

        let outcome = session
            .expand(&NodeId::root(), "another prompt")
            .await
            .unwrap();

        assert_eq!(outcome, ExpandOutcome::Skipped(SkipReason::AlreadyExpanded));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn drill_down_selects_the_child_and_attaches_grandchildren() {
        let mock = MockCompletionService::new()
            .with_response(TAGGED)
            .with_response(TAGGED);
        let mut session = controller(mock.clone());
        session.expand_from_root("a situation").await.unwrap();

        let child_text = session.state().latest_scenarios[0].text.clone();
        let outcome = session
            .expand_from_scenario(&NodeId::root(), 0, &child_text)
            .await
            .unwrap();
        assert_eq!(outcome, ExpandOutcome::Expanded);

        let tree = session.tree().unwrap();
        let child = crate::domain::tree::find_node(tree, &NodeId::new("root-0")).unwrap();
        assert!(child.is_selected);
        assert_eq!(child.children.len(), 3);
        assert!(tree.is_selected);

        // the follow-up prompt carries the cleaned text, not the markers
        let prompt = mock.last_prompt().unwrap();
        assert!(!prompt.contains("**"));
        assert!(prompt.contains("good things happen"));
    }

    #[tokio::test]
    async fn a_new_generate_replaces_the_previous_tree() {
        let mock = MockCompletionService::new()
            .with_response(TAGGED)
            .with_response(TAGGED);
        let mut session = controller(mock);

        session.expand_from_root("first situation").await.unwrap();
        session.expand_from_root("second situation").await.unwrap();

        let tree = session.tree().unwrap();
        assert_eq!(tree.text, "second situation");
        assert_eq!(tree.children.len(), 3);
    }
}
