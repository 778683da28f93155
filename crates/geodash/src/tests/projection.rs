#[cfg(test)]
mod tests {
    use cgmath::{EuclideanSpace, InnerSpace, Point3, Transform, Vector3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::{PI, TAU};

    use crate::{
        dynamics::Camera,
        helpers::{
            lat_lon_to_vec3, shortest_angle_delta, vec3_to_lat_lon, wrap_angle, SphericalCoord,
        },
        world::CameraConfig,
    };

    const EPS: f64 = 1e-9;

    fn assert_vec_close(a: Vector3<f64>, b: Vector3<f64>, tol: f64) {
        assert!(
            (a - b).magnitude() < tol,
            "vectors differ: {:?} vs {:?}",
            a,
            b
        );
    }

    #[test]
    fn poles_map_to_y_axis_for_any_longitude() {
        for lon in [-180.0, -75.0, 0.0, 42.5, 180.0] {
            assert_vec_close(lat_lon_to_vec3(90.0, lon, 2.8), Vector3::new(0.0, 2.8, 0.0), EPS);
            assert_vec_close(
                lat_lon_to_vec3(-90.0, lon, 2.8),
                Vector3::new(0.0, -2.8, 0.0),
                EPS,
            );
        }
    }

    #[test]
    fn longitude_offset_matches_texture_convention() {
        assert_vec_close(lat_lon_to_vec3(0.0, 0.0, 1.0), Vector3::new(1.0, 0.0, 0.0), EPS);
        assert_vec_close(lat_lon_to_vec3(0.0, 90.0, 1.0), Vector3::new(0.0, 0.0, -1.0), EPS);
        assert_vec_close(lat_lon_to_vec3(0.0, -90.0, 1.0), Vector3::new(0.0, 0.0, 1.0), EPS);
        assert_vec_close(lat_lon_to_vec3(0.0, 180.0, 1.0), Vector3::new(-1.0, 0.0, 0.0), EPS);
    }

    #[test]
    fn projection_preserves_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let lat = rng.gen_range(-90.0..=90.0);
            let lon = rng.gen_range(-180.0..=180.0);
            let r = rng.gen_range(0.0..10.0);
            let v = lat_lon_to_vec3(lat, lon, r);
            assert!((v.magnitude() - r).abs() < 1e-9, "|v|={} r={}", v.magnitude(), r);
        }
    }

    #[test]
    fn out_of_range_input_is_still_projected() {
        let v = lat_lon_to_vec3(120.0, 400.0, 3.0);
        assert!((v.magnitude() - 3.0).abs() < EPS);
    }

    #[test]
    fn inverse_projection_recovers_lat_lon() {
        for (lat, lon) in [(-9.2, -75.0), (39.9042, 116.4074), (0.0, 179.0), (-45.0, -179.5)] {
            let p = vec3_to_lat_lon(lat_lon_to_vec3(lat, lon, 2.8)).expect("non-zero");
            assert!((p.lat - lat).abs() < 1e-9, "lat {} vs {}", p.lat, lat);
            assert!((p.lon - lon).abs() < 1e-9, "lon {} vs {}", p.lon, lon);
        }
        assert!(vec3_to_lat_lon(Vector3::new(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn shortest_delta_is_bounded_and_congruent() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let from = rng.gen_range(-20.0..20.0);
            let to = rng.gen_range(-20.0..20.0);
            let d = shortest_angle_delta(from, to);
            assert!(d > -PI && d <= PI, "delta {} out of range", d);

            let diff = wrap_angle(from + d) - wrap_angle(to);
            let diff = diff.abs().min(TAU - diff.abs());
            assert!(diff < 1e-9, "from {} + {} != {}", from, d, to);
        }
    }

    #[test]
    fn shortest_delta_takes_the_short_way() {
        let d = shortest_angle_delta(350f64.to_radians(), 10f64.to_radians());
        assert!((d - 20f64.to_radians()).abs() < 1e-12);
        let d = shortest_angle_delta(10f64.to_radians(), 350f64.to_radians());
        assert!((d + 20f64.to_radians()).abs() < 1e-12);
        assert_eq!(shortest_angle_delta(1.0, 1.0), 0.0);
    }

    #[test]
    fn shortest_delta_is_antisymmetric_off_the_boundary() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let from = rng.gen_range(0.0..TAU);
            let to = rng.gen_range(0.0..TAU);
            let d = shortest_angle_delta(from, to);
            if (d.abs() - PI).abs() < 1e-9 {
                continue;
            }
            let back = shortest_angle_delta(to, from);
            assert!((d + back).abs() < 1e-9, "{} vs {}", d, back);
        }
    }

    #[test]
    fn half_turn_resolves_to_positive_pi() {
        let d = shortest_angle_delta(0.0, PI);
        assert!((d - PI).abs() < 1e-12);
    }

    #[test]
    fn spherical_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let v = Vector3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            let s = SphericalCoord::from_vec3(v);
            assert!(s.polar >= 0.0 && s.polar <= PI);
            assert!(s.azimuth >= 0.0 && s.azimuth < TAU);
            assert_vec_close(s.to_vec3(), v, 1e-9);
        }
    }

    #[test]
    fn camera_looks_at_origin() {
        let camera = Camera::new(&CameraConfig {
            start_position: [3.0, 4.0, 12.0],
            ..CameraConfig::default()
        });
        assert_eq!(camera.target(), Point3::origin());

        let view = camera.view_matrix();
        let origin_in_view = view.transform_point(Point3::origin());
        assert!(origin_in_view.x.abs() < 1e-9);
        assert!(origin_in_view.y.abs() < 1e-9);
        assert!((origin_in_view.z + 13.0).abs() < 1e-9);
    }

    #[test]
    fn billboard_rotation_faces_camera() {
        for eye in [[0.0, 0.0, 5.0], [5.0, 0.0, 0.0], [1.0, 2.0, -3.0], [0.0, 4.0, 0.0]] {
            let camera = Camera::new(&CameraConfig {
                start_position: eye,
                ..CameraConfig::default()
            });
            let q = camera.rotation();
            let facing = q * Vector3::unit_z();
            let toward_camera = camera.direction().expect("eye off origin");
            assert_vec_close(facing, toward_camera, 1e-9);
        }
    }
}
