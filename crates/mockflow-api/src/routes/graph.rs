//! Graph data endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use mockflow_core::FlowGraphNode;

use crate::types::ApiState;

/// Handler for GET /graph - returns the dependency trees as a bare array.
///
/// The payload shape is what the view feeds straight into its layout pass,
/// so there is no response envelope here.
pub async fn graph_handler(State(state): State<Arc<ApiState>>) -> Json<Vec<FlowGraphNode>> {
    let graph = state.graph.read().await;
    Json(graph.clone())
}
