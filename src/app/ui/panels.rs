use eframe::egui::{self, Align, Context, Layout};

use connectome_view::connectome::ConnectomeGraph;

use super::super::camera::OrbitCamera;
use super::super::{Scene, ViewModel, ViewScratch};

impl ViewModel {
    pub(in crate::app) fn new(graph: ConnectomeGraph, scene: Scene) -> Self {
        Self {
            graph,
            scene,
            camera: OrbitCamera::default(),
            search: String::new(),
            selected: None,
            show_all_labels: false,
            marker_radius: 2.5,
            edge_opacity: 0.5,
            edge_width: 2.0,
            min_edge_weight: 0.0,
            auto_rotate: false,
            search_match_cache: None,
            view_scratch: ViewScratch::default(),
            drawn_edge_count: 0,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("connectome-view");
                    ui.separator();
                    ui.label(self.scene.title.as_str());
                    ui.separator();
                    ui.label(format!("neurons: {}", self.graph.node_count()));
                    ui.label(format!("connections: {}", self.graph.edge_count()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "drawn: {}/{} connections",
                            self.drawn_edge_count,
                            self.graph.edge_count()
                        ));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_scene(ui));
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<usize>) {
        if self.selected == selected {
            return;
        }

        if let Some(name) = selected.and_then(|index| self.graph.node_name(index)) {
            log::debug!("selected neuron {name:?}");
        }
        self.selected = selected;
    }
}
