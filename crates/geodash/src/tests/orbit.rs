#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use crate::{
        dynamics::{Camera, InputState, OrbitControls},
        helpers::{Duration, FrameClock, SphericalCoord},
        world::{CameraConfig, InputEvent, Key, MouseButton, OrbitConfig, REFERENCE_RADIUS},
    };

    fn still_orbit() -> OrbitControls {
        OrbitControls::new(
            &OrbitConfig {
                auto_rotate: false,
                ..OrbitConfig::default()
            },
            REFERENCE_RADIUS,
        )
    }

    fn camera() -> Camera {
        Camera::new(&CameraConfig::default())
    }

    #[test]
    fn dolly_is_clamped_to_limits() {
        let mut cam = camera();
        let mut orbit = still_orbit();

        orbit.dolly(100.0);
        assert!(orbit.update(&mut cam, 0.016, true));
        assert!((cam.distance() - 10.0).abs() < 1e-9);

        orbit.dolly(1e-6);
        orbit.update(&mut cam, 0.016, true);
        assert!((cam.distance() - REFERENCE_RADIUS * 1.02).abs() < 1e-9);
    }

    #[test]
    fn polar_never_reaches_a_pole() {
        let mut cam = camera();
        let mut orbit = still_orbit();
        orbit.rotate(0.0, -10.0);
        orbit.update(&mut cam, 0.016, true);
        let s = SphericalCoord::from_vec3(cam.eye_vector());
        assert!(s.polar > 0.0 && s.polar < FRAC_PI_2);

        orbit.rotate(0.0, 10.0);
        orbit.update(&mut cam, 0.016, true);
        let s = SphericalCoord::from_vec3(cam.eye_vector());
        assert!(s.polar < PI && s.polar > FRAC_PI_2);
    }

    #[test]
    fn disabled_update_drops_input() {
        let mut cam = camera();
        let mut orbit = still_orbit();
        let before = cam.eye_vector();

        orbit.rotate(0.3, 0.1);
        orbit.dolly(0.5);
        assert!(!orbit.update(&mut cam, 0.016, false));
        assert!(!orbit.has_pending());
        assert_eq!(cam.eye_vector(), before);

        // nothing left over once re-enabled
        assert!(!orbit.update(&mut cam, 0.016, true));
        assert_eq!(cam.eye_vector(), before);
    }

    #[test]
    fn auto_rotate_speed_is_turns_per_minute() {
        let cfg = OrbitConfig {
            auto_rotate_speed: 1.0,
            ..OrbitConfig::default()
        };
        let orbit = OrbitControls::new(&cfg, REFERENCE_RADIUS);
        assert!((orbit.auto_rotate_rate() * 60.0 - TAU).abs() < 1e-12);

        let mut orbit = OrbitControls::new(&OrbitConfig::default(), REFERENCE_RADIUS);
        let mut cam = camera();
        let start = SphericalCoord::from_vec3(cam.eye_vector()).azimuth;
        orbit.update(&mut cam, 1.0, true);
        let end = SphericalCoord::from_vec3(cam.eye_vector()).azimuth;
        let turned = (start - end).rem_euclid(TAU);
        assert!((turned - TAU / 120.0).abs() < 1e-9);
    }

    #[test]
    fn drag_rotates_only_with_left_button() {
        let mut input = InputState::new();
        let mut orbit = still_orbit();

        input.queue_event(InputEvent::MouseMoved(10.0, 10.0), &mut orbit, 900.0);
        input.queue_event(InputEvent::MouseMoved(100.0, 10.0), &mut orbit, 900.0);
        assert!(!orbit.has_pending());

        input.queue_event(InputEvent::MouseButtonPressed(MouseButton::Left), &mut orbit, 900.0);
        input.queue_event(InputEvent::MouseMoved(190.0, 10.0), &mut orbit, 900.0);
        assert!(orbit.has_pending());

        input.queue_event(InputEvent::WindowFocused(false), &mut orbit, 900.0);
        assert!(!input.mouse_button_states[MouseButton::Left as usize]);
    }

    #[test]
    fn zoom_keys_dolly() {
        let mut input = InputState::new();
        let mut orbit = still_orbit();
        let mut cam = camera();

        input.queue_event(InputEvent::KeyPressed(Key::ZoomIn), &mut orbit, 900.0);
        orbit.update(&mut cam, 0.016, true);
        assert!((cam.distance() - 5.0 * 0.95).abs() < 1e-9);

        input.queue_event(InputEvent::KeyReleased(Key::ZoomIn), &mut orbit, 900.0);
        input.queue_event(InputEvent::KeyPressed(Key::Count), &mut orbit, 900.0);
        assert!(!orbit.has_pending());
    }

    #[test]
    fn frame_clock_clamps_long_frames() {
        let mut clock = FrameClock::new(Duration::from_millis(100));
        let t = clock.advance(Duration::from_secs(3));
        assert_eq!(t.frame, 1);
        assert!((t.dt_seconds - 0.1).abs() < 1e-12);

        let t = clock.advance(Duration::from_millis(16));
        assert_eq!(t.frame, 2);
        assert!((t.elapsed_seconds - 0.116).abs() < 1e-12);
    }
}
