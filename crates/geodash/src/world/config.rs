use serde::{Deserialize, Serialize};

use crate::{
    helpers::GlobeError,
    world::{anchor_key, Anchor},
};

/// Radius the animation tolerances were tuned against.
pub const REFERENCE_RADIUS: f64 = 2.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub globe_radius: f64,
    pub start_position: [f64; 3],
    pub fovy_deg: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            globe_radius: REFERENCE_RADIUS,
            start_position: [0.0, 0.0, 5.0],
            fovy_deg: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub azimuth_damping: f64,
    pub polar_damping: f64,
    pub radius_lerp: f64,
    pub zoom_lerp: f64,
    pub angle_tolerance_deg: f64,
    /// World units at [`REFERENCE_RADIUS`]; scaled with the globe radius.
    pub travel_distance_tolerance: f64,
    /// World units at [`REFERENCE_RADIUS`]; scaled with the globe radius.
    pub zoom_distance_tolerance: f64,
    pub travel_multiplier: f64,
    pub overview_multiplier: f64,
    pub zoom_in_multiplier: f64,
    pub zoom_out_multiplier: f64,
    pub max_phase_frames: Option<u32>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            azimuth_damping: 0.08,
            polar_damping: 0.07,
            radius_lerp: 0.06,
            zoom_lerp: 0.06,
            angle_tolerance_deg: 1.0,
            travel_distance_tolerance: 0.03,
            zoom_distance_tolerance: 0.01,
            travel_multiplier: 1.5,
            overview_multiplier: 1.8,
            zoom_in_multiplier: 1.05,
            zoom_out_multiplier: 1.5,
            max_phase_frames: Some(1800),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub auto_rotate: bool,
    /// Same unit as three.js OrbitControls: 1.0 = one turn per minute.
    pub auto_rotate_speed: f64,
    pub rotate_speed: f64,
    /// Defaults to just above the surface when unset.
    pub min_distance: Option<f64>,
    pub max_distance: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        OrbitConfig {
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            rotate_speed: 1.0,
            min_distance: None,
            max_distance: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub pixel_size: f64,
    pub pulse_speed: f64,
    /// Markers float this factor above the globe radius.
    pub altitude: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        MarkerConfig {
            pixel_size: 18.0,
            pulse_speed: 3.0,
            altitude: 1.002,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
    pub orbit: OrbitConfig,
    pub markers: MarkerConfig,
    pub anchors: Vec<Anchor>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            camera: CameraConfig::default(),
            animation: AnimationConfig::default(),
            orbit: OrbitConfig::default(),
            markers: MarkerConfig::default(),
            anchors: crate::world::default_anchors(),
        }
    }
}

fn in_unit_interval(name: &str, v: f64) -> Result<(), GlobeError> {
    if v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(GlobeError::InvalidConfig(format!(
            "{name} must be in (0, 1], got {v}"
        )))
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), GlobeError> {
        let cam = &self.camera;
        if !(cam.globe_radius > 0.0) || !cam.globe_radius.is_finite() {
            return Err(GlobeError::InvalidConfig(format!(
                "globe_radius must be positive, got {}",
                cam.globe_radius
            )));
        }
        if !(cam.fovy_deg > 0.0 && cam.fovy_deg < 180.0) {
            return Err(GlobeError::InvalidConfig(format!(
                "fovy_deg must be in (0, 180), got {}",
                cam.fovy_deg
            )));
        }

        let anim = &self.animation;
        in_unit_interval("azimuth_damping", anim.azimuth_damping)?;
        in_unit_interval("polar_damping", anim.polar_damping)?;
        in_unit_interval("radius_lerp", anim.radius_lerp)?;
        in_unit_interval("zoom_lerp", anim.zoom_lerp)?;

        let mut seen = std::collections::HashSet::new();
        for anchor in &self.anchors {
            if !seen.insert(anchor_key(&anchor.name)) {
                return Err(GlobeError::InvalidConfig(format!(
                    "duplicate anchor name {}",
                    anchor.name
                )));
            }
        }
        Ok(())
    }

    /// Ratio between the configured radius and the one the tolerances were
    /// tuned for.
    pub fn tolerance_scale(&self) -> f64 {
        self.camera.globe_radius / REFERENCE_RADIUS
    }
}
