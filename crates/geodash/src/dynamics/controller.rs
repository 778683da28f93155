use cgmath::{InnerSpace, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, info, warn};

use crate::{
    dynamics::Camera,
    helpers::{lat_lon_to_vec3, lerp, shortest_angle_delta, wrap_angle, GeoPoint, SphericalCoord},
    world::{AnimationConfig, Config},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Azimuth,
    Polar,
    ZoomIn,
    ZoomOut,
}

/// Input accepted by the controller. Requests are consumed one at a time, in
/// submission order, whenever the controller is idle. `Reset` is applied
/// immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    /// Focus flight; user controls stay locked after arrival until a reset.
    GoTo(GeoPoint),
    /// Return flight at the overview distance; controls unlock on arrival.
    Overview(GeoPoint),
    Reset,
    ZoomIn,
    ZoomOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    Arrived,
    ZoomedIn,
    ZoomedOut,
    /// The stall guard gave up on a phase and snapped the camera to its goal.
    Abandoned(Phase),
}

impl Completion {
    /// What the camera ended up doing, treating an abandoned phase as if it
    /// had finished normally.
    pub fn outcome(&self) -> Completion {
        match self {
            Completion::Abandoned(Phase::Azimuth | Phase::Polar) => Completion::Arrived,
            Completion::Abandoned(Phase::ZoomIn) => Completion::ZoomedIn,
            Completion::Abandoned(Phase::ZoomOut) => Completion::ZoomedOut,
            other => *other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub completion: Completion,
    pub frame: u64,
}

/// Per-instance animation state, mutated once per frame while not idle.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    pub phase: Phase,
    /// Unit vector toward the current travel (or zoom) target.
    pub desired_direction: Option<Vector3<f64>>,
    /// Camera distance captured on zoom-in, restored on zoom-out.
    pub pre_zoom_distance: Option<f64>,
    /// Set by a reset or an overview flight; the next travel settles at the
    /// wider overview distance.
    pub overview: bool,
    /// The running travel locks user controls when it arrives.
    pub focus_travel: bool,
    pub phase_frames: u32,
}

impl Default for ControllerState {
    fn default() -> Self {
        ControllerState {
            phase: Phase::Idle,
            desired_direction: None,
            pre_zoom_distance: None,
            overview: false,
            focus_travel: false,
            phase_frames: 0,
        }
    }
}

/// Animation constants resolved against the configured globe radius.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerParams {
    pub radius: f64,
    pub azimuth_damping: f64,
    pub polar_damping: f64,
    pub radius_lerp: f64,
    pub zoom_lerp: f64,
    pub angle_tolerance: f64,
    pub travel_tolerance: f64,
    pub zoom_tolerance: f64,
    pub travel_multiplier: f64,
    pub overview_multiplier: f64,
    pub zoom_in_multiplier: f64,
    pub zoom_out_multiplier: f64,
    pub max_phase_frames: Option<u32>,
}

impl ControllerParams {
    pub fn new(radius: f64, anim: &AnimationConfig, tolerance_scale: f64) -> Self {
        ControllerParams {
            radius,
            azimuth_damping: anim.azimuth_damping,
            polar_damping: anim.polar_damping,
            radius_lerp: anim.radius_lerp,
            zoom_lerp: anim.zoom_lerp,
            angle_tolerance: anim.angle_tolerance_deg.to_radians(),
            travel_tolerance: anim.travel_distance_tolerance * tolerance_scale,
            zoom_tolerance: anim.zoom_distance_tolerance * tolerance_scale,
            travel_multiplier: anim.travel_multiplier,
            overview_multiplier: anim.overview_multiplier,
            zoom_in_multiplier: anim.zoom_in_multiplier,
            zoom_out_multiplier: anim.zoom_out_multiplier,
            max_phase_frames: anim.max_phase_frames,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.camera.globe_radius,
            &config.animation,
            config.tolerance_scale(),
        )
    }
}

/// Drives the camera through travel and zoom animations, one bounded step
/// per rendered frame.
#[derive(Debug, Clone)]
pub struct CameraController {
    state: ControllerState,
    params: ControllerParams,
    queue: VecDeque<Request>,
    /// Holds user orbit controls off after a focus flight until reset.
    focus_lock: bool,
    frame: u64,
}

impl CameraController {
    pub fn new(params: ControllerParams) -> Self {
        CameraController {
            state: ControllerState::default(),
            params,
            queue: VecDeque::new(),
            focus_lock: false,
            frame: 0,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn params(&self) -> &ControllerParams {
        &self.params
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_idle(&self) -> bool {
        self.state.phase == Phase::Idle
    }

    /// Requests waiting for the controller to become idle.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_settled(&self) -> bool {
        self.is_idle() && self.queue.is_empty()
    }

    /// Whether free user orbiting may move the camera this frame.
    pub fn controls_enabled(&self) -> bool {
        self.is_idle() && !self.focus_lock
    }

    /// Returns `false` when the request was dropped (travel to a non-finite
    /// point).
    pub fn submit(&mut self, request: Request) -> bool {
        match request {
            Request::Reset => {
                self.reset();
                true
            }
            Request::GoTo(point) | Request::Overview(point) if !point.is_finite() => {
                debug!(?point, "ignoring travel request without a valid target");
                false
            }
            other => {
                self.queue.push_back(other);
                true
            }
        }
    }

    /// Drops the remembered pre-zoom distance, for when the zoomed view is
    /// abandoned without zooming out.
    pub fn forget_pre_zoom(&mut self) {
        self.state.pre_zoom_distance = None;
    }

    /// Cancels any in-flight animation and queued requests. Does not move the
    /// camera.
    pub fn reset(&mut self) {
        if self.state.phase != Phase::Idle || !self.queue.is_empty() {
            debug!(phase = ?self.state.phase, queued = self.queue.len(), "reset cancels animation");
        }
        self.queue.clear();
        self.state = ControllerState {
            overview: true,
            ..ControllerState::default()
        };
        self.focus_lock = false;
    }

    /// Advances the animation by one frame. Returns the completion event when
    /// a phase sequence finishes on this frame.
    pub fn advance(&mut self, camera: &mut Camera) -> Option<CompletionEvent> {
        self.frame += 1;

        if self.state.phase == Phase::Idle {
            if let Some(request) = self.queue.pop_front() {
                self.begin(request, camera);
            }
        }

        let completion = match self.state.phase {
            Phase::Idle => return None,
            Phase::ZoomIn => self.step_zoom_in(camera),
            Phase::ZoomOut => self.step_zoom_out(camera),
            Phase::Azimuth => self.step_azimuth(camera),
            Phase::Polar => self.step_polar(camera),
        };

        let completion = completion.or_else(|| self.check_stall(camera));
        completion.map(|completion| {
            info!(?completion, frame = self.frame, "camera animation complete");
            CompletionEvent {
                completion,
                frame: self.frame,
            }
        })
    }

    fn begin(&mut self, request: Request, camera: &Camera) {
        match request {
            Request::GoTo(point) => {
                self.state.focus_travel = true;
                self.begin_travel(point);
            }
            Request::Overview(point) => {
                self.state.overview = true;
                self.state.focus_travel = false;
                self.begin_travel(point);
            }
            Request::ZoomIn => {
                if self.state.pre_zoom_distance.is_none() {
                    self.state.pre_zoom_distance = Some(camera.distance());
                }
                if self.state.desired_direction.is_none() {
                    self.state.desired_direction = camera.direction();
                }
                self.enter(Phase::ZoomIn);
            }
            Request::ZoomOut => self.enter(Phase::ZoomOut),
            Request::Reset => self.reset(),
        }
    }

    fn begin_travel(&mut self, point: GeoPoint) {
        let dir = lat_lon_to_vec3(point.lat, point.lon, 1.0);
        self.state.desired_direction = Some(dir);
        self.enter(Phase::Azimuth);
    }

    fn arrive(&mut self) {
        self.state.overview = false;
        if self.state.focus_travel {
            self.focus_lock = true;
        }
        self.state.focus_travel = false;
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.state.phase, to = ?phase, "camera phase");
        self.state.phase = phase;
        self.state.phase_frames = 0;
    }

    fn finish(&mut self, completion: Completion) -> Option<Completion> {
        self.enter(Phase::Idle);
        self.state.desired_direction = None;
        Some(completion)
    }

    fn travel_distance(&self) -> f64 {
        let mult = if self.state.overview {
            self.params.overview_multiplier
        } else {
            self.params.travel_multiplier
        };
        self.params.radius * mult
    }

    fn zoom_in_distance(&self) -> f64 {
        self.params.radius * self.params.zoom_in_multiplier
    }

    fn zoom_out_distance(&self) -> f64 {
        self.state.pre_zoom_distance.unwrap_or_else(|| {
            let mult = if self.state.overview {
                self.params.overview_multiplier
            } else {
                self.params.zoom_out_multiplier
            };
            self.params.radius * mult
        })
    }

    fn hold_direction(&self, camera: &Camera) -> Vector3<f64> {
        self.state
            .desired_direction
            .or_else(|| camera.direction())
            .unwrap_or_else(Vector3::unit_z)
    }

    fn step_azimuth(&mut self, camera: &mut Camera) -> Option<Completion> {
        let Some(dir) = self.state.desired_direction else {
            return self.abort_travel();
        };
        self.state.phase_frames += 1;

        let current = SphericalCoord::from_vec3(camera.eye_vector());
        let desired = SphericalCoord::from_vec3(dir);
        let delta = shortest_angle_delta(current.azimuth, desired.azimuth);

        // Travel along the equator so the camera never swings over a pole.
        let next = SphericalCoord {
            radius: lerp(current.radius, self.travel_distance(), self.params.radius_lerp),
            polar: FRAC_PI_2,
            azimuth: wrap_angle(current.azimuth + delta * self.params.azimuth_damping),
        };
        camera.set_position(next.to_vec3());

        let remaining = delta * (1.0 - self.params.azimuth_damping);
        if remaining.abs() < self.params.angle_tolerance {
            self.enter(Phase::Polar);
        }
        None
    }

    fn step_polar(&mut self, camera: &mut Camera) -> Option<Completion> {
        let Some(dir) = self.state.desired_direction else {
            return self.abort_travel();
        };
        self.state.phase_frames += 1;

        let current = SphericalCoord::from_vec3(camera.eye_vector());
        let desired = SphericalCoord::from_vec3(dir);
        let target_distance = self.travel_distance();

        let polar = current.polar + (desired.polar - current.polar) * self.params.polar_damping;
        let radius = lerp(current.radius, target_distance, self.params.radius_lerp);
        camera.set_position(SphericalCoord::new(radius, polar, desired.azimuth).to_vec3());

        let polar_ok = (desired.polar - polar).abs() < self.params.angle_tolerance;
        let radius_ok = (radius - target_distance).abs() < self.params.travel_tolerance;
        if polar_ok && radius_ok {
            self.arrive();
            return self.finish(Completion::Arrived);
        }
        None
    }

    fn step_zoom_in(&mut self, camera: &mut Camera) -> Option<Completion> {
        self.state.phase_frames += 1;
        let target = self.zoom_in_distance();
        if self.step_distance(camera, target) {
            return self.finish(Completion::ZoomedIn);
        }
        None
    }

    fn step_zoom_out(&mut self, camera: &mut Camera) -> Option<Completion> {
        self.state.phase_frames += 1;
        let target = self.zoom_out_distance();
        if self.step_distance(camera, target) {
            self.state.pre_zoom_distance = None;
            return self.finish(Completion::ZoomedOut);
        }
        None
    }

    /// Eases the camera distance toward `target` keeping its direction.
    /// Returns true once within the zoom tolerance.
    fn step_distance(&mut self, camera: &mut Camera, target: f64) -> bool {
        let dir = self.hold_direction(camera);
        let distance = lerp(camera.distance(), target, self.params.zoom_lerp);
        camera.set_position(dir * distance);
        (distance - target).abs() < self.params.zoom_tolerance
    }

    // A travel phase without a direction has nothing to do.
    fn abort_travel(&mut self) -> Option<Completion> {
        self.enter(Phase::Idle);
        None
    }

    fn check_stall(&mut self, camera: &mut Camera) -> Option<Completion> {
        let max = self.params.max_phase_frames?;
        let phase = self.state.phase;
        if phase == Phase::Idle || self.state.phase_frames <= max {
            return None;
        }

        warn!(
            ?phase,
            frames = self.state.phase_frames,
            "camera animation stalled, snapping to target"
        );
        let dir = self.hold_direction(camera).normalize();
        match phase {
            Phase::Azimuth | Phase::Polar => {
                camera.set_position(dir * self.travel_distance());
                self.arrive();
            }
            Phase::ZoomIn => camera.set_position(dir * self.zoom_in_distance()),
            Phase::ZoomOut => {
                camera.set_position(dir * self.zoom_out_distance());
                self.state.pre_zoom_distance = None;
            }
            Phase::Idle => {}
        }
        self.finish(Completion::Abandoned(phase))
    }
}
