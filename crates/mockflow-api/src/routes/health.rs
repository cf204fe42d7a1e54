//! Health check endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::types::{ApiState, HealthResponse};

/// Handler for GET /health
pub async fn health_handler(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    let graph = state.graph.read().await;
    let nodes: usize = graph.iter().map(|t| t.subtree_size()).sum();
    // Each tree of size k contributes k-1 parent->child edges.
    let edges = nodes.saturating_sub(graph.len());

    Json(HealthResponse {
        status: "ok".to_string(),
        nodes,
        edges,
    })
}
