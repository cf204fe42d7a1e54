//! API types and DTOs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use mockflow_core::{FlowGraphNode, MockConfiguration};

/// Shared application state for the API.
pub struct ApiState {
    /// Dependency trees of the configured flows.
    pub graph: Arc<RwLock<Vec<FlowGraphNode>>>,
    /// Mockable dependency ids, keyed by flow name.
    pub dependencies: Arc<RwLock<HashMap<String, Vec<String>>>>,
    /// Saved configurations, keyed by flow name.
    pub configurations: Arc<RwLock<HashMap<String, MockConfiguration>>>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Total number of nodes across all flow trees.
    pub nodes: usize,
    /// Total number of parent->child edges across all flow trees.
    pub edges: usize,
}

/// Acknowledgment returned by `POST /configuration`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveAck {
    /// Whether the configuration was stored.
    pub saved: bool,
    /// The flow the configuration belongs to.
    pub flow_name: String,
}

/// Query parameters for flow-scoped reads.
#[derive(Debug, Deserialize)]
pub struct FlowQuery {
    /// Name of the flow being edited.
    pub flow: String,
}
