mod dynamics;
mod helpers;
mod markers;
mod world;

#[cfg(test)]
mod tests;

pub use dynamics::{
    Camera, CameraController, Completion, CompletionEvent, ControllerParams, ControllerState,
    InputState, OrbitControls, Phase, Request,
};
pub use helpers::{
    frame_mark, init_logging, init_profiling, km_to_deg_lat, km_to_deg_lon, lat_lon_to_vec3,
    shortest_angle_delta, vec3_to_lat_lon, wrap_angle, FrameClock, GeoPoint, GlobeError,
    Duration, SphericalCoord, Tick,
};
pub use markers::{
    local_offset_km, pixel_to_world, pulse_at, scatter_rect, scatter_rect_random, Marker,
    MarkerField, MarkerInstance, PulseSample, ScatterArea,
};
pub use world::{
    anchor_key, default_anchors, default_config, find_anchor, load_config, Anchor, AnimationConfig,
    CameraConfig, Config, FrameOutput, Globe, InputEvent, Key, LoadConfigError, MarkerConfig,
    MouseButton, OrbitConfig, REFERENCE_RADIUS,
};
