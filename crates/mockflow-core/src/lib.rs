//! Core domain types shared across the entire Mockflow workspace.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Mock Configuration Types
// =============================================================================

/// Credentials used when the flow runs against a real (non-mocked) database.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbCredentials {
    /// Database username.
    pub username: String,
    /// Database password.
    pub password: String,
}

/// Mock configuration for a single named flow.
///
/// Mutated only through UI interaction and persisted by an explicit save;
/// loading a stored configuration replaces the in-memory default wholesale.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockConfiguration {
    /// Name of the flow this configuration belongs to.
    pub flow_name: String,
    /// Dependencies the user chose to stub out instead of calling live.
    /// Order-insignificant membership list.
    pub entities_to_mock: Vec<String>,
    /// Whether the database is mocked for this flow.
    pub is_db_mocked: bool,
    /// Credentials for the real database when it is not mocked.
    pub db_credentials: DbCredentials,
}

impl MockConfiguration {
    /// Create a fresh default configuration for the given flow.
    pub fn for_flow(flow_name: impl Into<String>) -> Self {
        Self {
            flow_name: flow_name.into(),
            ..Self::default()
        }
    }

    /// Check whether a dependency is currently marked for mocking.
    pub fn is_entity_mocked(&self, entity: &str) -> bool {
        self.entities_to_mock.iter().any(|e| e == entity)
    }

    /// Toggle membership of a dependency in the mock set.
    ///
    /// Adds the id when absent, removes it when present; toggling twice
    /// restores the original membership.
    pub fn toggle_entity(&mut self, entity: &str) {
        if let Some(pos) = self.entities_to_mock.iter().position(|e| e == entity) {
            self.entities_to_mock.remove(pos);
        } else {
            self.entities_to_mock.push(entity.to_string());
        }
    }

    /// Drop every mocked entity that does not appear in the dependency list.
    ///
    /// Every entry in `entities_to_mock` must name a fetched dependency; a
    /// stored configuration can predate a graph change, so stale ids are
    /// pruned when both pieces of state are available.
    pub fn prune_unknown_entities(&mut self, dependencies: &[String]) {
        self.entities_to_mock
            .retain(|e| dependencies.iter().any(|d| d == e));
    }
}

// =============================================================================
// Flow Graph Types
// =============================================================================

/// A node in the server-provided dependency tree of a flow.
///
/// Read-only after fetch; converted once into positioned elements for
/// rendering and never mutated by the UI.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowGraphNode {
    /// Name of the function this node represents. Doubles as the node id.
    pub function: String,
    /// Callees of this function, in call order.
    #[serde(default)]
    pub children: Vec<FlowGraphNode>,
}

impl FlowGraphNode {
    /// Create a leaf node.
    pub fn leaf(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    pub fn with_children(function: impl Into<String>, children: Vec<FlowGraphNode>) -> Self {
        Self {
            function: function.into(),
            children,
        }
    }

    /// Total number of nodes in this subtree, including self.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(FlowGraphNode::subtree_size)
            .sum::<usize>()
    }
}

// =============================================================================
// Layout: tree -> positioned elements
// =============================================================================

/// Horizontal step between consecutively placed nodes.
pub const H_STEP: f32 = 200.0;
/// Vertical step between consecutively placed nodes.
pub const V_STEP: f32 = 100.0;

/// A graph node with an assigned canvas position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    /// Unique identifier (the function name).
    pub id: String,
    /// Display label.
    pub label: String,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

/// A parent->child edge between placed nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedEdge {
    /// Unique identifier, `"{source}-{target}"`.
    pub id: String,
    /// Parent node id.
    pub source: String,
    /// Child node id.
    pub target: String,
}

/// Flat node/edge lists produced from a flow tree, ready for rendering.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphElements {
    /// All placed nodes, in visit order.
    pub nodes: Vec<PlacedNode>,
    /// All parent->child edges, in visit order.
    pub edges: Vec<PlacedEdge>,
}

impl GraphElements {
    /// Returns the number of placed nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Convert to a petgraph `StableDiGraph` for rendering or analysis.
    /// Returns the graph and a mapping from node id to `NodeIndex`.
    pub fn to_petgraph(&self) -> (StableDiGraph<PlacedNode, ()>, HashMap<String, NodeIndex>) {
        let mut graph = StableDiGraph::new();
        let mut id_to_index = HashMap::new();

        for node in &self.nodes {
            let idx = graph.add_node(node.clone());
            id_to_index.insert(node.id.clone(), idx);
        }

        for edge in &self.edges {
            if let (Some(&from_idx), Some(&to_idx)) =
                (id_to_index.get(&edge.source), id_to_index.get(&edge.target))
            {
                graph.add_edge(from_idx, to_idx, ());
            }
        }

        (graph, id_to_index)
    }
}

/// Convert a forest of flow trees into positioned nodes and parent->child
/// edges via pre-order traversal.
///
/// A single placement cursor advances by [`H_STEP`]/[`V_STEP`] after every
/// visited node, so positions are strictly sequential in visit order. There
/// is no collision avoidance; the source is a tree, so no cycle handling is
/// needed either. Cost is O(n) in the total node count.
pub fn layout_forest(roots: &[FlowGraphNode]) -> GraphElements {
    let mut elements = GraphElements::default();
    let mut cursor = (0.0_f32, 0.0_f32);

    for root in roots {
        place_subtree(root, None, &mut cursor, &mut elements);
    }

    elements
}

fn place_subtree(
    node: &FlowGraphNode,
    parent: Option<&str>,
    cursor: &mut (f32, f32),
    out: &mut GraphElements,
) {
    out.nodes.push(PlacedNode {
        id: node.function.clone(),
        label: node.function.clone(),
        x: cursor.0,
        y: cursor.1,
    });

    if let Some(parent_id) = parent {
        out.edges.push(PlacedEdge {
            id: format!("{}-{}", parent_id, node.function),
            source: parent_id.to_string(),
            target: node.function.clone(),
        });
    }

    cursor.0 += H_STEP;
    cursor.1 += V_STEP;

    for child in &node.children {
        place_subtree(child, Some(&node.function), cursor, out);
    }
}
