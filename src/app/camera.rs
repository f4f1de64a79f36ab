use std::f32::consts::TAU;

use eframe::egui::{Pos2, Rect, Vec2, vec2};
use nalgebra::Vector3;

const CAMERA_DISTANCE: f32 = 3.2;
const MAX_PITCH: f32 = 1.483;
const ROTATE_SPEED: f32 = 0.008;
const MIN_ZOOM: f32 = 0.2;
const MAX_ZOOM: f32 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct OrbitCamera {
    pub(super) yaw: f32,
    pub(super) pitch: f32,
    pub(super) zoom: f32,
    pub(super) pan: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Projected {
    pub(super) pos: Pos2,
    pub(super) depth: f32,
    pub(super) scale: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.7,
            pitch: 0.45,
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl OrbitCamera {
    fn unit(rect: Rect) -> f32 {
        rect.width().min(rect.height()) * 0.36
    }

    pub(super) fn project(&self, rect: Rect, point: Vector3<f64>) -> Projected {
        let (x, y, z) = (point.x as f32, point.y as f32, point.z as f32);

        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let right = x * cos_yaw - y * sin_yaw;
        let forward = x * sin_yaw + y * cos_yaw;

        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let depth = forward * cos_pitch - z * sin_pitch;
        let up = forward * sin_pitch + z * cos_pitch;

        let scale = CAMERA_DISTANCE / (CAMERA_DISTANCE + depth).max(0.2);
        let unit = Self::unit(rect) * self.zoom * scale;

        Projected {
            pos: rect.center() + self.pan + vec2(right * unit, -up * unit),
            depth,
            scale,
        }
    }

    pub(super) fn rotate(&mut self, drag: Vec2) {
        self.yaw = (self.yaw - drag.x * ROTATE_SPEED).rem_euclid(TAU);
        self.pitch = (self.pitch + drag.y * ROTATE_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub(super) fn spin(&mut self, radians: f32) {
        self.yaw = (self.yaw + radians).rem_euclid(TAU);
    }

    pub(super) fn zoom_toward(&mut self, rect: Rect, pointer: Pos2, scroll: f32) {
        let factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        let zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let applied = zoom / self.zoom;

        let anchor = pointer - rect.center() - self.pan;
        self.pan += anchor * (1.0 - applied);
        self.zoom = zoom;
    }
}
