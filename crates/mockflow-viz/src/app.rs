//! Main application state and rendering logic.

use std::time::Duration;

use eframe::{App, CreationContext};
use egui::{Align2, CollapsingHeader, Context, FontId, Pos2, Vec2};
use petgraph::stable_graph::StableDiGraph;

use mockflow_core::PlacedNode;

use crate::api::{ApiClient, FetchEvent};
use crate::render::{edge_stroke, label_color, resolve_node_visuals, NodeRenderContext};
use crate::state::{SaveStatus, ViewState};

/// The configuration view application.
pub struct FlowMockApp {
    /// All mutable view state.
    state: ViewState,
    /// API client, polled each frame.
    client: ApiClient,
    /// petgraph mirror of the placed elements, rebuilt on graph load.
    graph: StableDiGraph<PlacedNode, ()>,
    /// Canvas pan offset.
    pan: Vec2,
    /// Canvas zoom factor.
    zoom: f32,
    /// Whether to show the side panel.
    show_sidebar: bool,
    /// Current dark mode state.
    dark_mode: bool,
}

impl FlowMockApp {
    /// Create the app and issue the three independent load requests.
    pub fn new(cc: &CreationContext<'_>, client: ApiClient) -> Self {
        let state = ViewState::new(client.flow());

        client.trigger_graph();
        client.trigger_dependencies();
        client.trigger_configuration();

        let dark_mode = cc.egui_ctx.style().visuals.dark_mode;

        Self {
            state,
            client,
            graph: StableDiGraph::new(),
            pan: Vec2::new(60.0, 60.0),
            zoom: 1.0,
            show_sidebar: true,
            dark_mode,
        }
    }

    /// Drain fetch results and apply them through the state handlers.
    fn apply_fetch_events(&mut self) {
        for event in self.client.poll() {
            match event {
                FetchEvent::Graph(Ok(trees)) => {
                    self.state.on_graph_loaded(trees);
                    self.rebuild_graph();
                }
                FetchEvent::Graph(Err(err)) => self.state.on_graph_failed(&err.to_string()),
                FetchEvent::Dependencies(Ok(payload)) => {
                    self.state.on_dependencies_loaded(payload)
                }
                FetchEvent::Dependencies(Err(err)) => {
                    self.state.on_dependencies_failed(&err.to_string())
                }
                FetchEvent::Configuration(Ok(config)) => {
                    self.state.on_configuration_loaded(config)
                }
                FetchEvent::Configuration(Err(err)) => {
                    self.state.on_configuration_failed(&err.to_string())
                }
                FetchEvent::Save(Ok(ack)) if ack.saved => self.state.on_save_result(Ok(())),
                FetchEvent::Save(Ok(_)) => self
                    .state
                    .on_save_result(Err("server did not store the configuration".to_string())),
                FetchEvent::Save(Err(err)) => self.state.on_save_result(Err(err.to_string())),
            }
        }
    }

    fn rebuild_graph(&mut self) {
        let (graph, _id_to_index) = self.state.elements.to_petgraph();
        self.graph = graph;
    }
}

// =============================================================================
// Side Panel UI
// =============================================================================

impl FlowMockApp {
    fn ui_info(&self, ui: &mut egui::Ui) {
        CollapsingHeader::new("Graph Info")
            .default_open(true)
            .show(ui, |ui| {
                ui.label(format!("Flow: {}", self.state.config.flow_name));
                ui.label(format!("Nodes: {}", self.graph.node_count()));
                ui.label(format!("Edges: {}", self.graph.edge_count()));
            });
    }

    fn ui_dependencies(&mut self, ui: &mut egui::Ui) {
        CollapsingHeader::new("Dependencies")
            .default_open(true)
            .show(ui, |ui| {
                if self.state.dependencies.is_empty() {
                    ui.label("No dependencies found.");
                    return;
                }

                for dependency in self.state.dependencies.clone() {
                    let mut checked = self.state.config.is_entity_mocked(&dependency);
                    if ui.checkbox(&mut checked, &dependency).changed() {
                        self.state.toggle_dependency(&dependency);
                    }
                }
            });
    }

    fn ui_database(&mut self, ui: &mut egui::Ui) {
        CollapsingHeader::new("Database")
            .default_open(true)
            .show(ui, |ui| {
                let mut mocked = self.state.config.is_db_mocked;
                if ui.checkbox(&mut mocked, "Mock the database").changed() {
                    self.state.set_db_mocked(mocked);
                }

                ui.add_enabled_ui(!self.state.config.is_db_mocked, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Username:");
                        ui.text_edit_singleline(&mut self.state.config.db_credentials.username);
                    });
                    ui.horizontal(|ui| {
                        ui.label("Password:");
                        ui.add(
                            egui::TextEdit::singleline(
                                &mut self.state.config.db_credentials.password,
                            )
                            .password(true),
                        );
                    });
                });
            });
    }

    fn ui_style(&mut self, ui: &mut egui::Ui) {
        CollapsingHeader::new("Style").show(ui, |ui| {
            let mut dark = ui.ctx().style().visuals.dark_mode;
            if ui.checkbox(&mut dark, "dark mode").changed() {
                if dark {
                    ui.ctx().set_visuals(egui::Visuals::dark());
                } else {
                    ui.ctx().set_visuals(egui::Visuals::light());
                }
                self.dark_mode = dark;
            }
        });
    }

    fn ui_save(&mut self, ui: &mut egui::Ui) {
        let saving = self.state.save_status == SaveStatus::Saving;

        ui.add_enabled_ui(!saving, |ui| {
            if ui.button("Save Configuration").clicked() {
                let snapshot = self.state.begin_save();
                self.client.trigger_save(snapshot);
            }
        });

        match &self.state.save_status {
            SaveStatus::Idle => {}
            SaveStatus::Saving => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Saving...");
                });
            }
            SaveStatus::Saved => {
                ui.label(
                    egui::RichText::new("✓ Configuration saved")
                        .color(egui::Color32::from_rgb(100, 200, 100)),
                );
            }
            SaveStatus::Failed(err) => {
                ui.label(
                    egui::RichText::new(format!("✗ Save failed: {err}"))
                        .color(egui::Color32::from_rgb(220, 80, 80)),
                );
            }
        }
    }
}

// =============================================================================
// Canvas
// =============================================================================

impl FlowMockApp {
    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;

        if response.dragged() {
            self.pan += response.drag_delta();
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.zoom = (self.zoom * (1.0 + scroll * 0.002)).clamp(0.1, 4.0);
            }
        }

        let to_screen = |node: &PlacedNode| -> Pos2 {
            rect.left_top() + self.pan + Vec2::new(node.x, node.y) * self.zoom
        };

        // Edges first, so nodes paint over them.
        let stroke = edge_stroke(self.dark_mode);
        for edge_idx in self.graph.edge_indices() {
            if let Some((source, target)) = self.graph.edge_endpoints(edge_idx) {
                let from = to_screen(&self.graph[source]);
                let to = to_screen(&self.graph[target]);
                painter.line_segment([from, to], stroke);
            }
        }

        let font = FontId::proportional((12.0 * self.zoom).clamp(8.0, 24.0));
        for node_idx in self.graph.node_indices() {
            let node = &self.graph[node_idx];
            let center = to_screen(node);
            if !rect.expand(40.0).contains(center) {
                continue;
            }

            let visuals = resolve_node_visuals(NodeRenderContext {
                dark_mode: self.dark_mode,
                zoom: self.zoom,
                mocked: self.state.config.is_entity_mocked(&node.id),
            });

            painter.circle(center, visuals.radius, visuals.fill, visuals.stroke);
            painter.text(
                center + Vec2::new(0.0, -visuals.radius - 4.0),
                Align2::CENTER_BOTTOM,
                &node.label,
                font.clone(),
                label_color(self.dark_mode),
            );
        }

        if self.graph.node_count() == 0 {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No graph loaded",
                FontId::proportional(16.0),
                label_color(self.dark_mode),
            );
        }
    }
}

// =============================================================================
// Main Update Loop
// =============================================================================

impl App for FlowMockApp {
    fn update(&mut self, ctx: &Context, _: &mut eframe::Frame) {
        self.apply_fetch_events();

        // Keep polling while requests are in flight, even without input.
        if self.client.is_loading() || self.state.save_status == SaveStatus::Saving {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Tab) {
                self.show_sidebar = !self.show_sidebar;
            }
        });

        if self.show_sidebar {
            egui::SidePanel::right("config_panel")
                .default_width(280.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.heading("Mockflow");
                        ui.separator();

                        self.ui_info(ui);
                        ui.separator();

                        self.ui_dependencies(ui);
                        ui.separator();

                        self.ui_database(ui);
                        ui.separator();

                        self.ui_style(ui);
                        ui.separator();

                        self.ui_save(ui);
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}
