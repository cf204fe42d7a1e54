//! egui desktop view for editing Mockflow configurations.
//!
//! The view fetches a flow's dependency graph, its mockable dependency list
//! and any stored configuration on startup, renders the graph on a canvas,
//! and lets the user toggle which dependencies to mock before saving the
//! configuration back to the server.

mod api;
mod app;
mod render;
mod state;

pub use api::{ApiClient, ClientError, FetchEvent, SaveAck};
pub use app::FlowMockApp;
pub use state::{SaveStatus, ViewState};
