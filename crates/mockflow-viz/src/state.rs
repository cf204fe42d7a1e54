//! View state and the discrete action handlers that mutate it.
//!
//! All mutable UI state lives in one explicit structure so the save snapshot
//! is unambiguous: handlers apply fetch results and local edits, the app
//! layer only renders what is here.

use mockflow_core::{layout_forest, FlowGraphNode, GraphElements, MockConfiguration};
use serde_json::Value;
use tracing::{error, warn};

/// Outcome of the most recent save action, surfaced in the side panel.
///
/// Failures are shown to the user just like successes; the original UI only
/// acknowledged the happy path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// No save issued yet.
    #[default]
    Idle,
    /// A save request is in flight.
    Saving,
    /// The server acknowledged the save.
    Saved,
    /// The save failed with the given message.
    Failed(String),
}

/// All mutable state owned by the configuration view.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Positioned nodes and edges of the flow graph. Empty until the graph
    /// loads, and stays empty if the load fails.
    pub elements: GraphElements,
    /// Mockable dependency ids for the flow, read-only after fetch.
    pub dependencies: Vec<String>,
    /// The configuration being edited. Starts as a default for the flow and
    /// is replaced wholesale when a stored configuration loads.
    pub config: MockConfiguration,
    /// Status of the last save action.
    pub save_status: SaveStatus,
    dependencies_loaded: bool,
    configuration_loaded: bool,
}

impl ViewState {
    /// Create the initial state for a flow.
    pub fn new(flow_name: impl Into<String>) -> Self {
        Self {
            config: MockConfiguration::for_flow(flow_name),
            ..Self::default()
        }
    }

    /// Apply a successful graph fetch: convert the trees into positioned
    /// elements in one pass.
    pub fn on_graph_loaded(&mut self, trees: Vec<FlowGraphNode>) {
        self.elements = layout_forest(&trees);
    }

    /// Apply a failed graph fetch: the canvas stays empty, no retry.
    pub fn on_graph_failed(&mut self, err: &str) {
        error!(error = %err, "failed to fetch flow graph");
    }

    /// Apply a dependency fetch result.
    ///
    /// The payload must be a JSON array of strings; anything else degrades
    /// to an empty list with a logged warning instead of failing the view.
    pub fn on_dependencies_loaded(&mut self, payload: Value) {
        self.dependencies = match serde_json::from_value::<Vec<String>>(payload) {
            Ok(deps) => deps,
            Err(err) => {
                warn!(error = %err, "invalid dependencies payload, expected an array of strings");
                Vec::new()
            }
        };
        self.dependencies_loaded = true;
        self.reconcile();
    }

    /// Apply a failed dependency fetch.
    ///
    /// A failure is not a fetched-empty list: pruning stays disarmed so a
    /// stored configuration arriving later keeps its entities intact.
    pub fn on_dependencies_failed(&mut self, err: &str) {
        error!(error = %err, "failed to fetch dependencies");
        self.dependencies.clear();
    }

    /// Replace the in-memory default with a stored configuration.
    pub fn on_configuration_loaded(&mut self, config: MockConfiguration) {
        self.config = config;
        self.configuration_loaded = true;
        self.reconcile();
    }

    /// Apply a failed configuration fetch: keep the local default.
    pub fn on_configuration_failed(&mut self, err: &str) {
        error!(error = %err, "failed to fetch configuration, keeping defaults");
    }

    /// Enforce the membership invariant once both the configuration and the
    /// dependency list are present: a stored configuration may reference
    /// dependencies that no longer exist in the graph.
    fn reconcile(&mut self) {
        if self.dependencies_loaded && self.configuration_loaded {
            let before = self.config.entities_to_mock.len();
            self.config.prune_unknown_entities(&self.dependencies);
            let pruned = before - self.config.entities_to_mock.len();
            if pruned > 0 {
                warn!(pruned, "dropped mocked entities unknown to the dependency list");
            }
        }
    }

    /// Toggle whether a dependency is mocked. Local-only until save.
    pub fn toggle_dependency(&mut self, dependency: &str) {
        self.config.toggle_entity(dependency);
    }

    /// Set the database mocking flag. Local-only until save.
    pub fn set_db_mocked(&mut self, mocked: bool) {
        self.config.is_db_mocked = mocked;
    }

    /// Snapshot the current configuration for a save request and mark the
    /// save as in flight.
    pub fn begin_save(&mut self) -> MockConfiguration {
        self.save_status = SaveStatus::Saving;
        self.config.clone()
    }

    /// Record the outcome of a save request.
    pub fn on_save_result(&mut self, result: Result<(), String>) {
        self.save_status = match result {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                error!(error = %err, "failed to save configuration");
                SaveStatus::Failed(err)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Vec<FlowGraphNode> {
        vec![FlowGraphNode::with_children(
            "root",
            vec![FlowGraphNode::leaf("a"), FlowGraphNode::leaf("b")],
        )]
    }

    #[test]
    fn graph_load_produces_elements() {
        let mut state = ViewState::new("checkout");
        state.on_graph_loaded(tree());

        assert_eq!(state.elements.node_count(), 3);
        assert_eq!(state.elements.edge_count(), 2);
    }

    #[test]
    fn graph_failure_leaves_canvas_empty() {
        let mut state = ViewState::new("checkout");
        state.on_graph_failed("connection refused");

        assert_eq!(state.elements.node_count(), 0);
    }

    #[test]
    fn malformed_dependencies_degrade_to_empty_list() {
        let mut state = ViewState::new("checkout");
        state.on_dependencies_loaded(json!({ "unexpected": "object" }));

        assert!(state.dependencies.is_empty());
    }

    #[test]
    fn well_formed_dependencies_are_kept() {
        let mut state = ViewState::new("checkout");
        state.on_dependencies_loaded(json!(["A", "B"]));

        assert_eq!(state.dependencies, vec!["A", "B"]);
    }

    #[test]
    fn toggle_sequence_matches_membership_semantics() {
        let mut state = ViewState::new("checkout");
        state.on_dependencies_loaded(json!(["A", "B"]));

        state.toggle_dependency("A");
        assert_eq!(state.config.entities_to_mock, vec!["A"]);

        state.toggle_dependency("A");
        assert!(state.config.entities_to_mock.is_empty());
    }

    #[test]
    fn loaded_configuration_replaces_default() {
        let mut state = ViewState::new("checkout");
        let mut stored = MockConfiguration::for_flow("checkout");
        stored.toggle_entity("A");
        stored.is_db_mocked = true;

        state.on_configuration_loaded(stored.clone());
        assert_eq!(state.config, stored);
    }

    #[test]
    fn unknown_entities_are_pruned_once_both_loads_arrive() {
        let mut state = ViewState::new("checkout");
        let mut stored = MockConfiguration::for_flow("checkout");
        stored.toggle_entity("A");
        stored.toggle_entity("gone");

        // Configuration first, dependencies second.
        state.on_configuration_loaded(stored);
        assert_eq!(state.config.entities_to_mock, vec!["A", "gone"]);

        state.on_dependencies_loaded(json!(["A", "B"]));
        assert_eq!(state.config.entities_to_mock, vec!["A"]);
    }

    #[test]
    fn failed_dependency_fetch_never_prunes_stored_configuration() {
        let mut state = ViewState::new("checkout");
        state.on_dependencies_failed("connection refused");

        let mut stored = MockConfiguration::for_flow("checkout");
        stored.toggle_entity("payment_gateway");
        state.on_configuration_loaded(stored);

        // The list was never fetched, only the fetch failed; the stored
        // entities must survive regardless of arrival order.
        assert_eq!(state.config.entities_to_mock, vec!["payment_gateway"]);
    }

    #[test]
    fn pruning_also_runs_when_configuration_arrives_last() {
        let mut state = ViewState::new("checkout");
        state.on_dependencies_loaded(json!(["A"]));

        let mut stored = MockConfiguration::for_flow("checkout");
        stored.toggle_entity("stale");
        state.on_configuration_loaded(stored);

        assert!(state.config.entities_to_mock.is_empty());
    }

    #[test]
    fn save_snapshot_reflects_all_prior_toggles() {
        let mut state = ViewState::new("checkout");
        state.on_dependencies_loaded(json!(["A", "B"]));

        state.toggle_dependency("A");
        state.toggle_dependency("B");
        state.toggle_dependency("A");
        state.set_db_mocked(true);

        let snapshot = state.begin_save();
        assert_eq!(snapshot.entities_to_mock, vec!["B"]);
        assert!(snapshot.is_db_mocked);
        assert_eq!(state.save_status, SaveStatus::Saving);
    }

    #[test]
    fn save_failure_is_surfaced() {
        let mut state = ViewState::new("checkout");
        state.begin_save();
        state.on_save_result(Err("HTTP 500".to_string()));

        assert_eq!(state.save_status, SaveStatus::Failed("HTTP 500".to_string()));
    }

    #[test]
    fn save_success_is_acknowledged() {
        let mut state = ViewState::new("checkout");
        state.begin_save();
        state.on_save_result(Ok(()));

        assert_eq!(state.save_status, SaveStatus::Saved);
    }
}
