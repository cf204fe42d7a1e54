//! Flow-scoped dependency and configuration endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use mockflow_core::MockConfiguration;
use tracing::info;

use crate::types::{ApiState, FlowQuery, SaveAck};

/// Handler for GET /dependencies?flow=<name> - mockable dependency ids.
///
/// A flow with no registered dependencies yields an empty array rather than
/// an error; the view degrades the same way on its side.
pub async fn dependencies_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FlowQuery>,
) -> Json<Vec<String>> {
    let dependencies = state.dependencies.read().await;
    Json(dependencies.get(&query.flow).cloned().unwrap_or_default())
}

/// Handler for GET /configuration?flow=<name>.
///
/// Returns the stored configuration, or a fresh default for the flow when
/// nothing was saved yet. The view replaces its local default with whatever
/// comes back, so a default body is the correct first-load answer.
pub async fn get_configuration_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FlowQuery>,
) -> Json<MockConfiguration> {
    let configurations = state.configurations.read().await;
    let config = configurations
        .get(&query.flow)
        .cloned()
        .unwrap_or_else(|| MockConfiguration::for_flow(&query.flow));
    Json(config)
}

/// Handler for POST /configuration - store a configuration keyed by flow name.
pub async fn save_configuration_handler(
    State(state): State<Arc<ApiState>>,
    Json(config): Json<MockConfiguration>,
) -> Json<SaveAck> {
    let flow_name = config.flow_name.clone();
    info!(
        flow = %flow_name,
        mocked_entities = config.entities_to_mock.len(),
        db_mocked = config.is_db_mocked,
        "storing configuration"
    );

    let mut configurations = state.configurations.write().await;
    configurations.insert(flow_name.clone(), config);

    Json(SaveAck {
        saved: true,
        flow_name,
    })
}
