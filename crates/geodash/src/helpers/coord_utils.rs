use cgmath::{InnerSpace, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Geographic coordinate in degrees. Values outside the natural ranges are
/// accepted and projected as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from(t: (f64, f64)) -> Self {
        Self { lat: t.0, lon: t.1 }
    }
}

/// Converts latitude/longitude (degrees) to a point on a y-up sphere.
///
/// Longitude carries a 180° offset so that the equirectangular Earth texture
/// lines up with the sphere's UVs. Latitude 90 maps to +y.
pub fn lat_lon_to_vec3(lat_deg: f64, lon_deg: f64, radius: f64) -> Vector3<f64> {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + 180.0).to_radians();

    let x = -radius * phi.sin() * theta.cos();
    let y = radius * phi.cos();
    let z = radius * phi.sin() * theta.sin();

    Vector3::new(x, y, z)
}

/// Inverse of [`lat_lon_to_vec3`]. Returns `None` for a zero-length vector.
pub fn vec3_to_lat_lon(v: Vector3<f64>) -> Option<GeoPoint> {
    let r = v.magnitude();
    if !(r > 1e-12) {
        return None;
    }
    let phi = (v.y / r).clamp(-1.0, 1.0).acos();
    let theta = v.z.atan2(-v.x);

    let lat = 90.0 - phi.to_degrees();
    let mut lon = theta.to_degrees() - 180.0;
    if lon < -180.0 {
        lon += 360.0;
    }
    Some(GeoPoint { lat, lon })
}

/// Wraps an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(a: f64) -> f64 {
    let w = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if w >= TAU {
        0.0
    } else {
        w
    }
}

/// Signed delta in `(-π, π]` that turns `from` onto `to` the short way.
#[inline]
pub fn shortest_angle_delta(from: f64, to: f64) -> f64 {
    let d = wrap_angle(to - from);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

/// Spherical form of a y-up vector: polar measured from +y, azimuth from +z
/// toward +x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalCoord {
    pub radius: f64,
    pub polar: f64,
    pub azimuth: f64,
}

impl SphericalCoord {
    pub fn new(radius: f64, polar: f64, azimuth: f64) -> Self {
        SphericalCoord {
            radius,
            polar,
            azimuth,
        }
    }

    pub fn from_vec3(v: Vector3<f64>) -> Self {
        let radius = v.magnitude();
        if radius == 0.0 {
            return SphericalCoord::new(0.0, 0.0, 0.0);
        }
        SphericalCoord {
            radius,
            polar: (v.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: wrap_angle(v.x.atan2(v.z)),
        }
    }

    pub fn to_vec3(&self) -> Vector3<f64> {
        let s = self.polar.sin() * self.radius;
        Vector3::new(
            s * self.azimuth.sin(),
            self.polar.cos() * self.radius,
            s * self.azimuth.cos(),
        )
    }
}

/// Kilometres to degrees of latitude.
#[inline]
pub fn km_to_deg_lat(km: f64) -> f64 {
    km / 110.574
}

/// Kilometres to degrees of longitude at latitude `lat0_deg`.
#[inline]
pub fn km_to_deg_lon(km: f64, lat0_deg: f64) -> f64 {
    km / (111.320 * lat0_deg.to_radians().cos())
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub fn safe_normalize(v: Vector3<f64>) -> Option<Vector3<f64>> {
    let m = v.magnitude();
    if m > 1e-12 && m.is_finite() {
        Some(v / m)
    } else {
        None
    }
}
