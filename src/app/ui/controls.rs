use eframe::egui::{self, Ui};
use fuzzy_matcher::skim::SkimMatcherV2;

use connectome_view::util::{display_name, fuzzy_match_score};

use super::super::ViewModel;
use super::super::camera::OrbitCamera;

const SEARCH_RESULT_LIMIT: usize = 24;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Scene Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search neurons")
            .on_hover_text("Fuzzy-highlight neurons whose name matches.");
        let search_response = ui
            .text_edit_singleline(&mut self.search)
            .on_hover_text("Type to highlight matching neurons. Enter selects an exact name.");
        if search_response.lost_focus()
            && ui.input(|input| input.key_pressed(egui::Key::Enter))
            && let Some(index) = self.graph.index_of(self.search.trim())
        {
            self.set_selected(Some(index));
        }
        self.draw_search_results(ui);

        ui.separator();

        ui.checkbox(&mut self.show_all_labels, "Show all labels")
            .on_hover_text("Draw every neuron name instead of only highlighted ones.");
        ui.checkbox(&mut self.auto_rotate, "Auto-rotate")
            .on_hover_text("Slowly spin the scene around the vertical axis.");

        ui.add_space(4.0);

        ui.add(
            egui::Slider::new(&mut self.marker_radius, 1.0..=8.0)
                .text("Marker size")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Base radius of the neuron markers.");
        ui.add(
            egui::Slider::new(&mut self.edge_width, 0.5..=6.0)
                .text("Connection width")
                .clamping(egui::SliderClamping::Always),
        );
        ui.add(
            egui::Slider::new(&mut self.edge_opacity, 0.05..=1.0)
                .text("Connection opacity")
                .clamping(egui::SliderClamping::Always),
        );

        let weight_max = self.graph.max_abs_weight().max(1.0) as f32;
        ui.add(
            egui::Slider::new(&mut self.min_edge_weight, 0.0..=weight_max)
                .text("Min |weight|")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Hide connections weaker than this. Highlighted connections stay visible.");

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Reset view").clicked() {
                self.camera = OrbitCamera::default();
            }
            if ui
                .add_enabled(self.selected.is_some(), egui::Button::new("Clear selection"))
                .clicked()
            {
                self.set_selected(None);
            }
        });

        ui.add_space(8.0);
        ui.small("Drag to orbit, right-drag to pan, scroll to zoom, click a neuron to select it.");
    }

    fn draw_search_results(&mut self, ui: &mut Ui) {
        let query = self.search.trim();
        if query.is_empty() {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut ranked = self
            .graph
            .nodes()
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                fuzzy_match_score(&matcher, name, query).map(|score| (index, score))
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        if ranked.is_empty() {
            ui.small("No neuron matches this search.");
            return;
        }

        let mut picked = None;
        egui::ScrollArea::vertical()
            .id_salt("search_results_scroll")
            .max_height(160.0)
            .show(ui, |ui| {
                for &(index, _) in ranked.iter().take(SEARCH_RESULT_LIMIT) {
                    let name = self.graph.node_name(index).unwrap_or_default();
                    if ui.link(display_name(name)).clicked() {
                        picked = Some(index);
                    }
                }
            });

        if ranked.len() > SEARCH_RESULT_LIMIT {
            ui.small(format!(
                "{} more matches not listed",
                ranked.len() - SEARCH_RESULT_LIMIT
            ));
        }

        if let Some(index) = picked {
            self.set_selected(Some(index));
        }
    }
}
