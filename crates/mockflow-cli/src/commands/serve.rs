//! Serve command - run the Mockflow API with sample flow data.

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use mockflow_api::{create_api_router, create_sample_state, SAMPLE_FLOW};

/// Run the API server on the given port until interrupted.
pub async fn execute(port: u16) -> Result<()> {
    let state = create_sample_state();
    let app = create_api_router(state);

    let addr = format!("0.0.0.0:{port}");
    info!(%addr, flow = SAMPLE_FLOW, "starting Mockflow API");

    println!("🚀 Mockflow API server");
    println!();
    println!("   Graph:         http://localhost:{port}/graph");
    println!("   Dependencies:  http://localhost:{port}/dependencies?flow={SAMPLE_FLOW}");
    println!("   Configuration: http://localhost:{port}/configuration?flow={SAMPLE_FLOW}");
    println!("   Health:        http://localhost:{port}/health");
    println!();
    println!("   Press Ctrl+C to stop");
    println!();

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
