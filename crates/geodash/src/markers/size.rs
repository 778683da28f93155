/// World-space size that renders as `px` screen pixels at `distance` from a
/// perspective camera with vertical field of view `fovy_deg`.
///
/// Has to be recomputed every frame while the camera distance animates.
pub fn pixel_to_world(px: f64, distance: f64, fovy_deg: f64, viewport_height_px: f64) -> f64 {
    if !(viewport_height_px > 0.0) {
        return 0.0;
    }
    let world_height = 2.0 * distance * (fovy_deg.to_radians() / 2.0).tan();
    (px / viewport_height_px) * world_height
}
