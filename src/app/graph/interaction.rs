use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::ViewModel;
use super::super::camera::Projected;

const HOVER_SLACK: f32 = 3.0;

impl ViewModel {
    pub(in crate::app) fn handle_scene_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = response.hover_pos().unwrap_or_else(|| rect.center());
        self.camera.zoom_toward(rect, pointer, scroll);
    }

    pub(in crate::app) fn handle_scene_drag(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary) {
            self.camera.rotate(response.drag_delta());
        }

        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.camera.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn hovered_index(
        response: &egui::Response,
        visible_mask: &[bool],
        markers: &[Projected],
        screen_radii: &[f32],
    ) -> Option<(usize, f32)> {
        let pointer = response.hover_pos()?;
        pick_marker(pointer, visible_mask, markers, screen_radii)
    }
}

fn pick_marker(
    pointer: Pos2,
    visible_mask: &[bool],
    markers: &[Projected],
    screen_radii: &[f32],
) -> Option<(usize, f32)> {
    markers
        .iter()
        .enumerate()
        .filter(|(index, _)| visible_mask.get(*index).copied().unwrap_or(false))
        .filter_map(|(index, projected)| {
            let distance = projected.pos.distance(pointer);
            let radius = screen_radii.get(index).copied().unwrap_or(0.0);
            (distance <= radius + HOVER_SLACK).then_some((index, projected.depth, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.2.total_cmp(&b.2)))
        .map(|(index, _, distance)| (index, distance))
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn marker(x: f32, y: f32, depth: f32) -> Projected {
        Projected {
            pos: pos2(x, y),
            depth,
            scale: 1.0,
        }
    }

    #[test]
    fn overlapping_markers_pick_the_front_one() {
        let markers = [marker(50.0, 50.0, 0.8), marker(54.0, 50.0, -0.3)];

        let picked = pick_marker(pos2(51.0, 50.0), &[true, true], &markers, &[6.0, 6.0]);

        assert_eq!(picked.map(|(index, _)| index), Some(1));
    }

    #[test]
    fn equal_depth_falls_back_to_pointer_distance() {
        let markers = [marker(50.0, 50.0, 0.2), marker(56.0, 50.0, 0.2)];

        let picked = pick_marker(pos2(55.0, 50.0), &[true, true], &markers, &[6.0, 6.0]);

        assert_eq!(picked, Some((1, 1.0)));
    }

    #[test]
    fn hidden_or_distant_markers_are_ignored() {
        let markers = [marker(50.0, 50.0, -1.0), marker(200.0, 200.0, -2.0)];

        assert_eq!(
            pick_marker(pos2(50.0, 50.0), &[false, true], &markers, &[6.0, 6.0]),
            None
        );
        assert!(pick_marker(pos2(50.0, 50.0), &[true, true], &markers, &[6.0, 6.0]).is_some());
    }
}
