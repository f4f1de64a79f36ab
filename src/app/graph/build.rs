use eframe::egui::Rect;

use super::super::ViewModel;
use super::super::render_utils::circle_visible;

impl ViewModel {
    pub(in crate::app) fn project_scene(&mut self, rect: Rect) {
        let camera = self.camera;
        let radius_scale = self.marker_radius * camera.zoom.powf(0.40);
        let scratch = &mut self.view_scratch;

        scratch.markers.clear();
        scratch.markers.extend(
            self.scene
                .markers
                .iter()
                .map(|marker| camera.project(rect, marker.position)),
        );

        scratch.screen_radii.clear();
        scratch.screen_radii.extend(
            scratch
                .markers
                .iter()
                .map(|projected| (radius_scale * projected.scale).clamp(1.5, 24.0)),
        );

        scratch.visible_mask.clear();
        scratch.visible_mask.extend(
            scratch
                .markers
                .iter()
                .zip(&scratch.screen_radii)
                .map(|(projected, radius)| circle_visible(rect, projected.pos, *radius)),
        );

        scratch.segments.clear();
        scratch.segments.extend(self.scene.segments.iter().map(|segment| {
            [
                camera.project(rect, segment.start),
                camera.project(rect, segment.end),
            ]
        }));

        let markers = &scratch.markers;
        scratch.marker_order.clear();
        scratch.marker_order.extend(0..markers.len());
        scratch
            .marker_order
            .sort_by(|a, b| markers[*b].depth.total_cmp(&markers[*a].depth));

        let segments = &scratch.segments;
        scratch.segment_order.clear();
        scratch.segment_order.extend(0..segments.len());
        scratch.segment_order.sort_by(|a, b| {
            let depth_a = segments[*a][0].depth + segments[*a][1].depth;
            let depth_b = segments[*b][0].depth + segments[*b][1].depth;
            depth_b.total_cmp(&depth_a)
        });
    }
}
