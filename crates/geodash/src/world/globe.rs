use cgmath::Matrix4;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, info};

use crate::{
    dynamics::{
        Camera, CameraController, Completion, CompletionEvent, ControllerParams, InputState,
        OrbitControls, Phase, Request,
    },
    helpers::{frame_mark, init_profiling, vec3_to_lat_lon, Duration, FrameClock, GeoPoint, GlobeError},
    markers::{MarkerField, MarkerInstance},
    world::{find_anchor, Anchor, Config, InputEvent},
};

/// Where a flight is headed; `anchor` is `None` for ad-hoc points and for
/// the return flight after a reset.
#[derive(Debug, Clone, PartialEq)]
struct Flight {
    anchor: Option<String>,
    point: GeoPoint,
}

/// Everything a renderer and the dashboard panels need for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    pub frame: u64,
    pub eye: [f64; 3],
    /// Always the origin.
    pub target: [f64; 3],
    pub up: [f64; 3],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub phase: Phase,
    pub completion: Option<CompletionEvent>,
    /// Geographic point under the camera.
    pub sub_point: Option<GeoPoint>,
    pub focus: Option<String>,
    pub zoomed_in: bool,
    /// An animation is running or queued.
    pub busy: bool,
    pub controls_enabled: bool,
    pub zoom_in_enabled: bool,
    pub zoom_out_enabled: bool,
    pub markers: Vec<MarkerInstance>,
}

fn to_f32_cols(m: Matrix4<f64>) -> [[f32; 4]; 4] {
    let cols: [[f64; 4]; 4] = m.into();
    cols.map(|c| c.map(|v| v as f32))
}

/// The globe dashboard's scene state: one camera, its animation controller,
/// free orbit controls and the halo markers of the focused anchor.
pub struct Globe {
    config: Config,
    camera: Camera,
    controller: CameraController,
    orbit: OrbitControls,
    input: InputState,
    markers: MarkerField,
    clock: FrameClock,
    rng: StdRng,

    /// Flights submitted to the controller, oldest first.
    flights: VecDeque<Flight>,
    focus: Option<Flight>,
    zoomed_in: bool,
}

impl Globe {
    pub fn new(config: &Config) -> Result<Self, GlobeError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible marker placement.
    pub fn with_seed(config: &Config, seed: u64) -> Result<Self, GlobeError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &Config, rng: StdRng) -> Result<Self, GlobeError> {
        config.validate()?;
        init_profiling();

        let radius = config.camera.globe_radius;
        let globe = Globe {
            camera: Camera::new(&config.camera),
            controller: CameraController::new(ControllerParams::from_config(config)),
            orbit: OrbitControls::new(&config.orbit, radius),
            input: InputState::new(),
            markers: MarkerField::new(),
            clock: FrameClock::default(),
            rng,
            flights: VecDeque::new(),
            focus: None,
            zoomed_in: false,
            config: config.clone(),
        };
        info!(radius, anchors = config.anchors.len(), "globe created");
        Ok(globe)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.config.anchors
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_ref().and_then(|f| f.anchor.as_deref())
    }

    pub fn is_zoomed_in(&self) -> bool {
        self.zoomed_in
    }

    pub fn is_busy(&self) -> bool {
        !self.controller.is_settled()
    }

    /// Current halo marker locations, for panels listing them.
    pub fn marker_points(&self) -> Vec<GeoPoint> {
        if self.markers_visible() {
            self.markers.points()
        } else {
            Vec::new()
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(width, height);
    }

    pub fn input(&mut self, event: InputEvent) {
        let viewport_h = self.camera.viewport().1;
        self.input.queue_event(event, &mut self.orbit, viewport_h);
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.orbit.auto_rotate = enabled;
    }

    /// Flies to a configured anchor and focuses it once there.
    pub fn go_to_anchor(&mut self, name: &str) -> Result<(), GlobeError> {
        let anchor = find_anchor(&self.config.anchors, name)
            .ok_or_else(|| GlobeError::UnknownAnchor(name.to_string()))?;
        let flight = Flight {
            anchor: Some(anchor.name.clone()),
            point: anchor.point,
        };
        self.submit_flight(flight, false);
        Ok(())
    }

    /// Flies to an arbitrary point. No anchor is focused on arrival, so no
    /// markers appear.
    pub fn go_to(&mut self, point: GeoPoint) -> bool {
        self.submit_flight(
            Flight {
                anchor: None,
                point,
            },
            false,
        )
    }

    /// Any flight leaves the zoomed view; the markers belong to the anchor
    /// being left.
    fn submit_flight(&mut self, flight: Flight, overview: bool) -> bool {
        let request = if overview {
            Request::Overview(flight.point)
        } else {
            Request::GoTo(flight.point)
        };
        if !self.controller.submit(request) {
            return false;
        }
        debug!(anchor = ?flight.anchor, point = ?flight.point, overview, "flight queued");
        self.leave_zoom();
        self.flights.push_back(flight);
        true
    }

    fn leave_zoom(&mut self) {
        if self.zoomed_in {
            debug!(focus = ?self.focus(), "leaving zoomed view");
        }
        self.zoomed_in = false;
        self.markers.clear();
        self.controller.forget_pre_zoom();
    }

    /// Cancels whatever is animating, drops the focus and its markers, then
    /// flies back out to the overview distance just west of where the view
    /// was headed. With no heading yet, the first configured anchor is used,
    /// so hosts call this once at startup for the opening overview.
    pub fn reset_view(&mut self) {
        let heading = self
            .focus
            .as_ref()
            .map(|f| f.point)
            .or_else(|| self.flights.back().map(|f| f.point))
            .or_else(|| self.config.anchors.first().map(|a| a.point));

        self.controller.submit(Request::Reset);
        self.flights.clear();
        self.focus = None;
        self.zoomed_in = false;
        self.markers.clear();

        if let Some(p) = heading {
            self.submit_flight(
                Flight {
                    anchor: None,
                    point: GeoPoint::new(p.lat, p.lon - 1.0),
                },
                true,
            );
        }
    }

    /// Zoom in is only offered on a focused anchor, once the camera is still.
    pub fn zoom_in_enabled(&self) -> bool {
        self.focus().is_some() && !self.zoomed_in && self.controller.is_settled()
    }

    pub fn zoom_out_enabled(&self) -> bool {
        self.zoomed_in && self.controller.is_settled()
    }

    pub fn zoom_in(&mut self) -> bool {
        if !self.zoom_in_enabled() {
            debug!("zoom in ignored");
            return false;
        }
        self.controller.submit(Request::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> bool {
        if !self.zoom_out_enabled() {
            debug!("zoom out ignored");
            return false;
        }
        self.controller.submit(Request::ZoomOut)
    }

    fn markers_visible(&self) -> bool {
        self.zoomed_in && self.focus().is_some()
    }

    fn on_complete(&mut self, event: CompletionEvent) {
        match event.completion.outcome() {
            Completion::Arrived => {
                let flight = self.flights.pop_front();
                self.leave_zoom();
                self.focus = flight.filter(|f| f.anchor.is_some());
                if let Some(name) = self.focus() {
                    info!(anchor = name, "focused");
                }
            }
            Completion::ZoomedIn => {
                self.zoomed_in = true;
                let anchor = self
                    .focus()
                    .and_then(|name| find_anchor(&self.config.anchors, name))
                    .cloned();
                match anchor {
                    Some(anchor) => self.markers.populate(&mut self.rng, &anchor),
                    None => self.markers.clear(),
                }
            }
            Completion::ZoomedOut => {
                self.zoomed_in = false;
                self.markers.clear();
            }
            Completion::Abandoned(_) => {}
        }
    }

    /// Advances one frame using the wall clock.
    pub fn update(&mut self) -> FrameOutput {
        let tick = self.clock.tick();
        self.step(tick.dt_seconds, tick.elapsed_seconds, tick.frame)
    }

    /// Advances one frame by `dt`.
    pub fn update_with_dt(&mut self, dt: Duration) -> FrameOutput {
        let tick = self.clock.advance(dt);
        self.step(tick.dt_seconds, tick.elapsed_seconds, tick.frame)
    }

    fn step(&mut self, dt_s: f64, elapsed_s: f64, frame: u64) -> FrameOutput {
        let completion = self.controller.advance(&mut self.camera);
        if let Some(event) = completion {
            self.on_complete(event);
        }

        let controls_enabled = self.controller.controls_enabled();
        self.orbit.update(&mut self.camera, dt_s, controls_enabled);

        let markers = if self.markers_visible() {
            self.markers.instances(
                &self.camera,
                self.config.camera.globe_radius,
                &self.config.markers,
                elapsed_s,
            )
        } else {
            Vec::new()
        };

        frame_mark();

        let eye = self.camera.eye_vector();
        let up = self.camera.up();
        FrameOutput {
            frame,
            eye: eye.into(),
            target: [0.0, 0.0, 0.0],
            up: up.into(),
            view: to_f32_cols(self.camera.view_matrix()),
            projection: to_f32_cols(self.camera.projection_matrix()),
            phase: self.controller.phase(),
            completion,
            sub_point: vec3_to_lat_lon(eye),
            focus: self.focus().map(str::to_string),
            zoomed_in: self.zoomed_in,
            busy: self.is_busy(),
            controls_enabled,
            zoom_in_enabled: self.zoom_in_enabled(),
            zoom_out_enabled: self.zoom_out_enabled(),
            markers,
        }
    }
}
