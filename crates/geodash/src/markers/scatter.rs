use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::helpers::{km_to_deg_lat, km_to_deg_lon, GeoPoint};

/// Rectangle in the local east/north plane around an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterArea {
    pub width_km: f64,
    pub height_km: f64,
    pub count: usize,
    /// Counter-clockwise rotation about the anchor, degrees.
    pub rotation_deg: f64,
    /// Eastward shift applied after the rotation.
    pub east_bias_km: f64,
}

/// Draws `area.count` independent uniform points inside the rotated,
/// east-biased rectangle around `anchor`.
pub fn scatter_rect<R: Rng + ?Sized>(
    rng: &mut R,
    anchor: GeoPoint,
    area: &ScatterArea,
) -> Vec<GeoPoint> {
    let (sin_r, cos_r) = area.rotation_deg.to_radians().sin_cos();
    let half_w = area.width_km.abs() / 2.0;
    let half_h = area.height_km.abs() / 2.0;

    (0..area.count)
        .map(|_| {
            let u = sample_symmetric(&mut *rng, half_w);
            let v = sample_symmetric(&mut *rng, half_h);

            let east = u * cos_r - v * sin_r + area.east_bias_km;
            let north = u * sin_r + v * cos_r;

            GeoPoint {
                lat: anchor.lat + km_to_deg_lat(north),
                lon: anchor.lon + km_to_deg_lon(east, anchor.lat),
            }
        })
        .collect()
}

/// [`scatter_rect`] with the thread-local RNG; repeated calls differ.
pub fn scatter_rect_random(anchor: GeoPoint, area: &ScatterArea) -> Vec<GeoPoint> {
    scatter_rect(&mut rand::thread_rng(), anchor, area)
}

/// Maps a scattered point back to its un-rotated, pre-bias rectangle
/// coordinates `(u, v)` in kilometres.
pub fn local_offset_km(anchor: GeoPoint, area: &ScatterArea, p: GeoPoint) -> (f64, f64) {
    let north = (p.lat - anchor.lat) * 110.574;
    let east = (p.lon - anchor.lon) * 111.320 * anchor.lat.to_radians().cos() - area.east_bias_km;

    let (sin_r, cos_r) = area.rotation_deg.to_radians().sin_cos();
    let u = east * cos_r + north * sin_r;
    let v = -east * sin_r + north * cos_r;
    (u, v)
}

fn sample_symmetric<R: Rng + ?Sized>(rng: &mut R, half: f64) -> f64 {
    if half > 0.0 {
        rng.gen_range(-half..=half)
    } else {
        0.0
    }
}
