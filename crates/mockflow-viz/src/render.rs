//! Node/edge rendering helpers for the flow canvas.

use egui::{Color32, Stroke};

/// Resolved visuals for a single node.
#[derive(Debug, Clone, Copy)]
pub struct NodeVisuals {
    pub radius: f32,
    pub fill: Color32,
    pub stroke: Stroke,
}

/// Inputs that decide how a node is drawn.
#[derive(Debug, Clone, Copy)]
pub struct NodeRenderContext {
    pub dark_mode: bool,
    pub zoom: f32,
    /// Whether this node's dependency is currently marked for mocking.
    pub mocked: bool,
}

pub fn base_node_radius(zoom: f32) -> f32 {
    (8.0 * zoom).clamp(3.0, 20.0)
}

pub fn resolve_node_visuals(ctx: NodeRenderContext) -> NodeVisuals {
    let radius = base_node_radius(ctx.zoom);

    let fill = if ctx.mocked {
        mocked_color(ctx.dark_mode)
    } else {
        node_base_color(ctx.dark_mode)
    };

    let stroke = if ctx.mocked {
        Stroke::new(2.0, mocked_ring_color(ctx.dark_mode))
    } else {
        Stroke::NONE
    };

    NodeVisuals {
        radius,
        fill,
        stroke,
    }
}

pub fn edge_stroke(dark_mode: bool) -> Stroke {
    Stroke::new(1.0, edge_base_color(dark_mode))
}

pub fn label_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_gray(220)
    } else {
        Color32::from_gray(40)
    }
}

fn node_base_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(100, 140, 180)
    } else {
        Color32::from_rgb(60, 100, 140)
    }
}

fn mocked_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(255, 170, 0)
    } else {
        Color32::from_rgb(200, 130, 0)
    }
}

fn mocked_ring_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(255, 210, 100)
    } else {
        Color32::from_rgb(150, 100, 0)
    }
}

fn edge_base_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_gray(120)
    } else {
        Color32::from_gray(160)
    }
}
