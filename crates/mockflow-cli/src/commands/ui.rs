//! Ui command - launch the desktop configuration view.

use anyhow::{anyhow, Result};
use eframe::NativeOptions;
use tracing::info;

use mockflow_viz::{ApiClient, FlowMockApp};

/// Launch the eframe app against the given server and flow.
pub fn execute(base_url: String, flow: String) -> Result<()> {
    info!(%base_url, %flow, "launching configuration UI");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Mockflow"),
        ..Default::default()
    };

    let client = ApiClient::new(base_url, flow);

    eframe::run_native(
        "Mockflow",
        options,
        Box::new(move |cc| Ok(Box::new(FlowMockApp::new(cc, client)))),
    )
    .map_err(|e| anyhow!("failed to start UI: {e}"))
}
