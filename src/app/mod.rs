use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::Context;

use connectome_view::connectome::ConnectomeGraph;

mod camera;
mod graph;
mod highlight;
mod render_utils;
mod scene;
mod ui;

use camera::{OrbitCamera, Projected};
pub use scene::Scene;

pub struct ConnectomeApp {
    model: Box<ViewModel>,
}

struct ViewModel {
    graph: ConnectomeGraph,
    scene: Scene,
    camera: OrbitCamera,
    search: String,
    selected: Option<usize>,
    show_all_labels: bool,
    marker_radius: f32,
    edge_opacity: f32,
    edge_width: f32,
    min_edge_weight: f32,
    auto_rotate: bool,
    search_match_cache: Option<SearchMatchCache>,
    view_scratch: ViewScratch,
    drawn_edge_count: usize,
}

struct SearchMatchCache {
    query: String,
    matches: Arc<HashSet<usize>>,
}

#[derive(Default)]
struct ViewScratch {
    markers: Vec<Projected>,
    screen_radii: Vec<f32>,
    visible_mask: Vec<bool>,
    segments: Vec<[Projected; 2]>,
    marker_order: Vec<usize>,
    segment_order: Vec<usize>,
}

struct ConnectionEntry {
    node: usize,
    name: String,
    weight: f64,
}

struct HighlightState {
    related_nodes: HashSet<usize>,
    related_edges: HashSet<usize>,
}

impl ConnectomeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, graph: ConnectomeGraph, scene: Scene) -> Self {
        Self {
            model: Box::new(ViewModel::new(graph, scene)),
        }
    }
}

impl eframe::App for ConnectomeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.model.show(ctx);
    }
}
