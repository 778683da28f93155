use serde::{Deserialize, Serialize};

use crate::{helpers::GeoPoint, markers::ScatterArea};

/// A named focus target and the rectangle its halo markers are scattered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub name: String,
    pub point: GeoPoint,
    pub scatter: ScatterArea,
}

impl Anchor {
    pub fn new(name: &str, lat: f64, lon: f64, scatter: ScatterArea) -> Self {
        Anchor {
            name: name.to_string(),
            point: GeoPoint::new(lat, lon),
            scatter,
        }
    }
}

pub fn default_anchors() -> Vec<Anchor> {
    vec![
        Anchor::new(
            "Peru",
            -9.2,
            -75.0,
            ScatterArea {
                width_km: 500.0,
                height_km: 1200.0,
                count: 36,
                rotation_deg: -30.0,
                east_bias_km: 120.0,
            },
        ),
        Anchor::new(
            "Lima",
            -12.0464,
            -77.0428,
            ScatterArea {
                width_km: 120.0,
                height_km: 160.0,
                count: 24,
                rotation_deg: -20.0,
                east_bias_km: 20.0,
            },
        ),
        Anchor::new(
            "Beijing",
            39.9042,
            116.4074,
            ScatterArea {
                width_km: 180.0,
                height_km: 140.0,
                count: 24,
                rotation_deg: 0.0,
                east_bias_km: 0.0,
            },
        ),
    ]
}

/// Case-insensitive lookup, Unicode aware.
pub fn find_anchor<'a>(anchors: &'a [Anchor], name: &str) -> Option<&'a Anchor> {
    let key = anchor_key(name);
    anchors.iter().find(|a| anchor_key(&a.name) == key)
}

/// Folded form anchor names are compared by.
pub fn anchor_key(name: &str) -> String {
    name.to_lowercase()
}
