use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Painter, Rect, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::skim::SkimMatcherV2;
use nalgebra::Vector3;

use connectome_view::util::{display_name, fuzzy_match_score};

use super::super::highlight::build_highlight_state;
use super::super::render_utils::{
    BACKGROUND_COLOR, EDGE_COLOR, NODE_COLOR, NODE_OPACITY, RELATED_COLOR, SEARCH_COLOR,
    SELECTED_COLOR, blend_color, draw_background, edge_visible, with_opacity,
};
use super::super::{SearchMatchCache, ViewModel};

const AXIS_EXTENT: f64 = 1.15;
const AUTO_ROTATE_SPEED: f32 = 0.35;

fn cube_corner(corner: usize) -> Vector3<f64> {
    let sign = |bit: usize| if corner & (1 << bit) == 0 { -1.0 } else { 1.0 };
    Vector3::new(sign(0), sign(1), sign(2))
}

impl ViewModel {
    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let search_query = self.search.trim();
        if search_query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.query == search_query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .graph
            .nodes()
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                fuzzy_match_score(&matcher, name, search_query).map(|_| index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: search_query.to_owned(),
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    fn draw_axes(&self, painter: &Painter, rect: Rect) {
        let cube_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(90, 100, 115, 60));
        for corner in 0..8 {
            for bit in 0..3 {
                if corner & (1 << bit) != 0 {
                    continue;
                }
                let start = self.camera.project(rect, cube_corner(corner)).pos;
                let end = self.camera.project(rect, cube_corner(corner | (1 << bit))).pos;
                painter.line_segment([start, end], cube_stroke);
            }
        }

        let axis_stroke = Stroke::new(1.2, Color32::from_rgba_unmultiplied(150, 160, 175, 150));
        let units = [Vector3::x(), Vector3::y(), Vector3::z()];
        for (unit, title) in units.into_iter().zip(&self.scene.axis_titles) {
            let start = self.camera.project(rect, unit * -AXIS_EXTENT).pos;
            let end = self.camera.project(rect, unit * AXIS_EXTENT).pos;
            painter.line_segment([start, end], axis_stroke);

            let anchor = self.camera.project(rect, unit * (AXIS_EXTENT + 0.12)).pos;
            painter.text(
                anchor,
                Align2::CENTER_CENTER,
                title,
                FontId::proportional(12.0),
                Color32::from_gray(200),
            );
        }
    }

    pub(in crate::app) fn draw_scene(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);

        self.handle_scene_zoom(ui, rect, &response);
        self.handle_scene_drag(&response);

        if response.dragged() {
            ui.ctx().request_repaint();
        } else if self.auto_rotate {
            let delta_seconds = ui.ctx().input(|input| input.stable_dt).min(0.1);
            self.camera.spin(delta_seconds * AUTO_ROTATE_SPEED);
            ui.ctx().request_repaint();
        }

        self.project_scene(rect);
        self.draw_axes(&painter, rect);

        painter.text(
            rect.center_top() + vec2(0.0, 12.0),
            Align2::CENTER_TOP,
            self.scene.title.as_str(),
            FontId::proportional(18.0),
            Color32::from_gray(235),
        );

        if self.scene.markers.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "The adjacency sheet produced no neurons.",
                FontId::proportional(14.0),
                Color32::from_gray(200),
            );
            self.drawn_edge_count = 0;
            return;
        }

        let search_matches = self.cached_search_matches();
        let scratch = &self.view_scratch;

        let hovered = Self::hovered_index(
            &response,
            &scratch.visible_mask,
            &scratch.markers,
            &scratch.screen_radii,
        );
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let pending_selection = if response.clicked_by(egui::PointerButton::Primary) {
            Some(hovered.map(|(index, _)| self.scene.markers[index].node))
        } else {
            None
        };

        let hovered_index = hovered.map(|(index, _)| index);
        let highlight = self
            .selected
            .and_then(|selected| build_highlight_state(&self.graph, selected));
        let selection_active = highlight.is_some();
        let search_active = search_matches
            .as_ref()
            .is_some_and(|matches| !matches.is_empty());

        let min_weight = f64::from(self.min_edge_weight);
        let mut drawn_edge_count = 0usize;
        for &index in &scratch.segment_order {
            let segment = &self.scene.segments[index];
            let is_related = highlight
                .as_ref()
                .is_some_and(|state| state.related_edges.contains(&segment.edge));
            if !is_related && segment.weight.abs() < min_weight {
                continue;
            }

            let [start, end] = scratch.segments[index];
            if !edge_visible(rect, start.pos, end.pos, 2.0) {
                continue;
            }

            let stroke = if is_related {
                Stroke::new(self.edge_width * 1.5, with_opacity(RELATED_COLOR, 0.9))
            } else if selection_active {
                Stroke::new(
                    self.edge_width * 0.6,
                    with_opacity(EDGE_COLOR, self.edge_opacity * 0.3),
                )
            } else {
                Stroke::new(self.edge_width, with_opacity(EDGE_COLOR, self.edge_opacity))
            };

            painter.line_segment([start.pos, end.pos], stroke);
            drawn_edge_count += 1;
        }

        for &index in &scratch.marker_order {
            if !scratch.visible_mask.get(index).copied().unwrap_or(false) {
                continue;
            }

            let marker = &self.scene.markers[index];
            let position = scratch.markers[index].pos;
            let radius = scratch.screen_radii[index];

            let is_selected = self.selected == Some(marker.node);
            let is_hovered = hovered_index == Some(index);
            let is_related = highlight
                .as_ref()
                .is_some_and(|state| state.related_nodes.contains(&marker.node));
            let is_search_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&marker.node));

            let color = if is_selected {
                SELECTED_COLOR
            } else if is_hovered {
                blend_color(NODE_COLOR, Color32::WHITE, 0.35)
            } else if is_related {
                blend_color(NODE_COLOR, RELATED_COLOR, 0.6)
            } else if is_search_match {
                blend_color(NODE_COLOR, SEARCH_COLOR, 0.7)
            } else if selection_active || search_active {
                blend_color(NODE_COLOR, BACKGROUND_COLOR, 0.55)
            } else {
                NODE_COLOR
            };

            painter.circle_filled(position, radius, with_opacity(color, NODE_OPACITY));
            if is_selected {
                painter.circle_stroke(position, radius + 3.0, Stroke::new(1.6, SELECTED_COLOR));
            }

            let should_draw_label = self.show_all_labels
                || is_selected
                || is_hovered
                || is_search_match
                || (is_related && selection_active);
            if should_draw_label {
                painter.text(
                    position + vec2(radius + 4.0, 0.0),
                    Align2::LEFT_CENTER,
                    display_name(&marker.label),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some((index, _)) = hovered {
            let marker = &self.scene.markers[index];
            let panel_text = format!(
                "{}  |  out {}  |  in {}",
                display_name(&marker.label),
                self.graph.outgoing(marker.node).count(),
                self.graph.incoming(marker.node).count()
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        self.drawn_edge_count = drawn_edge_count;
        if let Some(selected) = pending_selection {
            self.set_selected(selected);
        }
    }
}
