//! Sample flow data for demonstration and tests.

use std::collections::HashMap;
use std::sync::Arc;

use mockflow_core::FlowGraphNode;

use crate::types::ApiState;

/// The flow the sample data describes.
pub const SAMPLE_FLOW: &str = "checkout";

/// Create the sample dependency tree for the checkout flow.
pub fn sample_graph() -> Vec<FlowGraphNode> {
    vec![FlowGraphNode::with_children(
        "checkout",
        vec![
            FlowGraphNode::with_children(
                "validate_cart",
                vec![FlowGraphNode::leaf("inventory_service")],
            ),
            FlowGraphNode::with_children(
                "charge_payment",
                vec![
                    FlowGraphNode::leaf("payment_gateway"),
                    FlowGraphNode::leaf("fraud_check"),
                ],
            ),
            FlowGraphNode::with_children(
                "send_receipt",
                vec![FlowGraphNode::leaf("email_service")],
            ),
        ],
    )]
}

/// Dependencies of the sample flow that can be toggled for mocking.
pub fn sample_dependencies() -> Vec<String> {
    vec![
        "inventory_service".to_string(),
        "payment_gateway".to_string(),
        "fraud_check".to_string(),
        "email_service".to_string(),
    ]
}

/// Create an API state pre-populated with the sample flow.
pub fn create_sample_state() -> Arc<ApiState> {
    let mut dependencies = HashMap::new();
    dependencies.insert(SAMPLE_FLOW.to_string(), sample_dependencies());
    crate::create_api_state(sample_graph(), dependencies)
}
