//! REST API service backing the Mockflow configuration UI.
//!
//! This crate provides a clean API layer the desktop view consumes.
//! It separates data serving from visualization concerns.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check with node/edge counts
//! - `GET /graph` - Dependency trees of the configured flows (JSON array)
//! - `GET /dependencies?flow=<name>` - Mockable dependency ids for a flow
//! - `GET /configuration?flow=<name>` - Stored (or default) configuration
//! - `POST /configuration` - Persist a configuration, keyed by flow name
//!
//! ## Test-only mock handler
//!
//! [`mock_handlers`] builds a separate router that intercepts
//! `POST /carts/{cart_id}` with a canned payload. It exists to support
//! automated UI tests and is never mounted in the runtime router.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mockflow_api::{create_api_router, create_api_state};
//!
//! let state = create_api_state(Vec::new(), Default::default());
//! let router = create_api_router(state);
//! ```

mod mock;
mod routes;
mod sample;
mod types;

pub use mock::mock_handlers;
pub use routes::create_api_router;
pub use sample::{create_sample_state, sample_dependencies, sample_graph, SAMPLE_FLOW};
pub use types::{ApiState, HealthResponse, SaveAck};

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use mockflow_core::FlowGraphNode;

/// Create a new API state with the given flow trees and per-flow
/// dependency lists. Configurations start empty and accumulate on save.
pub fn create_api_state(
    graph: Vec<FlowGraphNode>,
    dependencies: HashMap<String, Vec<String>>,
) -> Arc<ApiState> {
    Arc::new(ApiState {
        graph: Arc::new(RwLock::new(graph)),
        dependencies: Arc::new(RwLock::new(dependencies)),
        configurations: Arc::new(RwLock::new(HashMap::new())),
    })
}
