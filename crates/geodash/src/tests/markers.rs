#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Quaternion, Vector3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::FRAC_PI_2;

    use crate::{
        dynamics::Camera,
        markers::{
            pixel_to_world, pulse_at, MarkerField, MarkerInstance, PULSE_OPACITY_MAX,
            PULSE_OPACITY_MIN,
        },
        world::{default_anchors, find_anchor, CameraConfig, MarkerConfig, REFERENCE_RADIUS},
    };

    #[test]
    fn full_viewport_height_at_ninety_degrees() {
        // tan(45°) = 1 so the visible height is twice the distance
        let size = pixel_to_world(800.0, 3.0, 90.0, 800.0);
        assert!((size - 6.0).abs() < 1e-9);
    }

    #[test]
    fn world_size_scales_with_distance_and_pixels() {
        let near = pixel_to_world(18.0, 2.94, 75.0, 900.0);
        let far = pixel_to_world(18.0, 5.88, 75.0, 900.0);
        assert!((far - 2.0 * near).abs() < 1e-12);

        let double = pixel_to_world(36.0, 2.94, 75.0, 900.0);
        assert!((double - 2.0 * near).abs() < 1e-12);
    }

    #[test]
    fn degenerate_viewport_gives_zero() {
        assert_eq!(pixel_to_world(18.0, 3.0, 75.0, 0.0), 0.0);
        assert_eq!(pixel_to_world(18.0, 3.0, 75.0, -10.0), 0.0);
        assert_eq!(pixel_to_world(18.0, 3.0, 75.0, f64::NAN), 0.0);
    }

    #[test]
    fn pulse_stays_in_range() {
        for i in 0..1000 {
            let t = i as f64 * 0.013;
            let s = pulse_at(t, 3.0, 0.7);
            assert!((0.0..=1.0).contains(&s.pulse));
            assert!(s.scale >= 0.9 - 1e-12 && s.scale <= 1.1 + 1e-12);
            assert!(s.opacity >= PULSE_OPACITY_MIN - 1e-12);
            assert!(s.opacity <= PULSE_OPACITY_MAX + 1e-12);
        }
    }

    #[test]
    fn pulse_peaks_with_quarter_turn_offset() {
        let s = pulse_at(0.0, 3.0, FRAC_PI_2);
        assert!((s.pulse - 1.0).abs() < 1e-12);
        assert!((s.scale - 1.1).abs() < 1e-12);
        assert!((s.opacity - 0.47).abs() < 1e-12);

        let rest = pulse_at(0.0, 3.0, 0.0);
        assert!((rest.scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn populate_replaces_previous_markers() {
        let anchors = default_anchors();
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = MarkerField::new();
        assert!(field.is_empty());

        field.populate(&mut rng, find_anchor(&anchors, "peru").unwrap());
        assert_eq!(field.len(), 36);

        field.populate(&mut rng, find_anchor(&anchors, "Lima").unwrap());
        assert_eq!(field.len(), 24);
        assert!(field.markers().iter().all(|m| (0.0..std::f64::consts::TAU).contains(&m.phase_offset)));

        field.clear();
        assert!(field.is_empty());
        assert!(field.points().is_empty());
    }

    #[test]
    fn instances_face_the_camera_and_pulse() {
        let anchors = default_anchors();
        let mut rng = StdRng::seed_from_u64(12);
        let mut field = MarkerField::new();
        field.populate(&mut rng, find_anchor(&anchors, "Beijing").unwrap());

        let mut camera = Camera::new(&CameraConfig::default());
        camera.set_viewport(1200.0, 900.0);
        let cfg = MarkerConfig::default();

        let instances = field.instances(&camera, REFERENCE_RADIUS, &cfg, 1.25);
        assert_eq!(instances.len(), 24);

        let back = camera.direction().unwrap();
        for inst in &instances {
            let r = Vector3::new(
                inst.position[0] as f64,
                inst.position[1] as f64,
                inst.position[2] as f64,
            )
            .magnitude();
            assert!((r - REFERENCE_RADIUS * cfg.altitude).abs() < 1e-4);
            assert!(inst.scale > 0.0);
            assert!(inst.opacity >= PULSE_OPACITY_MIN as f32 - 1e-6);
            assert!(inst.opacity <= PULSE_OPACITY_MAX as f32 + 1e-6);

            let [x, y, z, w] = inst.rotation;
            let q = Quaternion::new(w as f64, x as f64, y as f64, z as f64);
            let normal = q * Vector3::unit_z();
            assert!((normal - back).magnitude() < 1e-5);
        }
    }

    #[test]
    fn instances_have_zero_size_without_viewport() {
        let anchors = default_anchors();
        let mut field = MarkerField::new();
        field.populate(&mut StdRng::seed_from_u64(13), &anchors[0]);
        let camera = Camera::new(&CameraConfig::default());
        // still emitted, just with zero size
        let instances = field.instances(&camera, REFERENCE_RADIUS, &MarkerConfig::default(), 0.0);
        assert_eq!(instances.len(), 36);
        assert!(instances.iter().all(|i| i.scale == 0.0));
    }

    #[test]
    fn instance_buffer_is_tightly_packed() {
        let inst = MarkerInstance {
            position: [1.0, 2.0, 3.0],
            scale: 0.5,
            rotation: [0.0, 0.0, 0.0, 1.0],
            opacity: 0.3,
            _pad: [0.0; 3],
        };
        let bytes: &[u8] = bytemuck::bytes_of(&inst);
        assert_eq!(bytes.len(), std::mem::size_of::<MarkerInstance>());
        assert_eq!(bytes.len(), 12 * 4);
    }
}
