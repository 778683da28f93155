use std::f64::consts::{PI, TAU};

use crate::{
    dynamics::Camera,
    helpers::{wrap_angle, SphericalCoord},
    world::OrbitConfig,
};

/// Keeps the camera off the exact poles where azimuth is undefined.
const POLAR_EPS: f64 = 1e-3;

/// Free orbiting around the pinned origin, used whenever the animation
/// controller is idle and the view is not locked on a focus.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
    pub rotate_speed: f64,
    pub min_distance: f64,
    pub max_distance: f64,

    pending_azimuth: f64,
    pending_polar: f64,
    pending_dolly: f64,
}

impl OrbitControls {
    pub fn new(cfg: &OrbitConfig, globe_radius: f64) -> Self {
        let min_distance = cfg.min_distance.unwrap_or(globe_radius * 1.02);
        OrbitControls {
            auto_rotate: cfg.auto_rotate,
            auto_rotate_speed: cfg.auto_rotate_speed,
            rotate_speed: cfg.rotate_speed,
            min_distance,
            max_distance: cfg.max_distance.max(min_distance),
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_dolly: 1.0,
        }
    }

    /// Queues a rotation in radians, applied on the next update.
    pub fn rotate(&mut self, d_azimuth: f64, d_polar: f64) {
        self.pending_azimuth += d_azimuth;
        self.pending_polar += d_polar;
    }

    /// Queues a distance scale; values below 1 move closer.
    pub fn dolly(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.pending_dolly *= scale;
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending_azimuth != 0.0 || self.pending_polar != 0.0 || self.pending_dolly != 1.0
    }

    pub fn clear_pending(&mut self) {
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_dolly = 1.0;
    }

    /// Radians per second of auto rotation.
    pub fn auto_rotate_rate(&self) -> f64 {
        TAU / 60.0 * self.auto_rotate_speed
    }

    /// Applies queued input and auto rotation. When `enabled` is false the
    /// queued input is dropped and the camera is left untouched.
    pub fn update(&mut self, camera: &mut Camera, dt_s: f64, enabled: bool) -> bool {
        if !enabled {
            self.clear_pending();
            return false;
        }
        if !self.has_pending() && !self.auto_rotate {
            return false;
        }

        let mut s = SphericalCoord::from_vec3(camera.eye_vector());
        if s.radius == 0.0 {
            self.clear_pending();
            return false;
        }

        let mut d_azimuth = self.pending_azimuth * self.rotate_speed;
        if self.auto_rotate {
            d_azimuth -= self.auto_rotate_rate() * dt_s.max(0.0);
        }
        s.azimuth = wrap_angle(s.azimuth + d_azimuth);
        s.polar = (s.polar + self.pending_polar * self.rotate_speed).clamp(POLAR_EPS, PI - POLAR_EPS);
        s.radius = (s.radius * self.pending_dolly).clamp(self.min_distance, self.max_distance);

        camera.set_position(s.to_vec3());
        self.clear_pending();
        true
    }
}
