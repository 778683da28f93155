use cgmath::{EuclideanSpace, InnerSpace};
use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;

use crate::{
    dynamics::Camera,
    helpers::{lat_lon_to_vec3, GeoPoint},
    markers::{pixel_to_world, pulse_at, scatter_rect},
    world::{Anchor, MarkerConfig},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub point: GeoPoint,
    /// Radians added to the pulse clock.
    pub phase_offset: f64,
}

/// Per-marker record laid out for a GPU instance buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize)]
pub struct MarkerInstance {
    pub position: [f32; 3],
    pub scale: f32,
    /// Billboard rotation quaternion as (x, y, z, w).
    pub rotation: [f32; 4],
    pub opacity: f32,
    #[serde(skip)]
    pub _pad: [f32; 3],
}

/// Halo markers around the focused anchor.
#[derive(Debug, Clone, Default)]
pub struct MarkerField {
    markers: Vec<Marker>,
}

impl MarkerField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current markers with a fresh scatter around `anchor`.
    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R, anchor: &Anchor) {
        self.markers = scatter_rect(rng, anchor.point, &anchor.scatter)
            .into_iter()
            .map(|point| Marker {
                point,
                phase_offset: rng.gen_range(0.0..TAU),
            })
            .collect();
        tracing::debug!(anchor = %anchor.name, count = self.markers.len(), "markers populated");
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn points(&self) -> Vec<GeoPoint> {
        self.markers.iter().map(|m| m.point).collect()
    }

    /// Builds this frame's billboards. Sizes are recomputed from the current
    /// camera distance so markers keep a constant on-screen size.
    pub fn instances(
        &self,
        camera: &Camera,
        globe_radius: f64,
        cfg: &MarkerConfig,
        elapsed_s: f64,
    ) -> Vec<MarkerInstance> {
        let q = camera.rotation();
        let rotation = [q.v.x as f32, q.v.y as f32, q.v.z as f32, q.s as f32];
        let eye = camera.position().to_vec();
        let viewport_h = camera.viewport().1;

        self.markers
            .iter()
            .map(|m| {
                let pos = lat_lon_to_vec3(m.point.lat, m.point.lon, globe_radius * cfg.altitude);
                let distance = (eye - pos).magnitude();
                let base = pixel_to_world(cfg.pixel_size, distance, camera.fovy_deg(), viewport_h);
                let pulse = pulse_at(elapsed_s, cfg.pulse_speed, m.phase_offset);

                MarkerInstance {
                    position: [pos.x as f32, pos.y as f32, pos.z as f32],
                    scale: (base * pulse.scale) as f32,
                    rotation,
                    opacity: pulse.opacity as f32,
                    _pad: [0.0; 3],
                }
            })
            .collect()
    }
}
