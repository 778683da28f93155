use cgmath::{
    Deg, EuclideanSpace, InnerSpace, Matrix3, Matrix4, Point3, Quaternion, Vector3, Zero,
};

use crate::{helpers::safe_normalize, world::CameraConfig};

/// Perspective camera orbiting the globe. The look-at target is pinned to
/// the world origin; only the eye moves.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Point3<f64>,
    up: Vector3<f64>,

    fovy: Deg<f64>,
    aspect: f64,
    near: f64,
    far: f64,
    viewport_wh: (f64, f64),
}

impl Camera {
    pub fn new(cfg: &CameraConfig) -> Self {
        let [x, y, z] = cfg.start_position;
        Camera {
            eye: Point3::new(x, y, z),
            up: Vector3::unit_y(),
            fovy: Deg(cfg.fovy_deg),
            aspect: 1.0,
            near: cfg.near,
            far: cfg.far,
            viewport_wh: (0.0, 0.0),
        }
    }

    pub fn position(&self) -> Point3<f64> {
        self.eye
    }

    pub fn eye_vector(&self) -> Vector3<f64> {
        self.eye.to_vec()
    }

    pub fn set_position(&mut self, eye: Vector3<f64>) {
        if eye.x.is_finite() && eye.y.is_finite() && eye.z.is_finite() {
            self.eye = Point3::from_vec(eye);
        } else {
            tracing::warn!(?eye, "ignoring non-finite camera position");
        }
    }

    /// Always the world origin.
    pub fn target(&self) -> Point3<f64> {
        Point3::origin()
    }

    pub fn up(&self) -> Vector3<f64> {
        self.up
    }

    pub fn distance(&self) -> f64 {
        self.eye.to_vec().magnitude()
    }

    /// Unit vector from the origin toward the eye.
    pub fn direction(&self) -> Option<Vector3<f64>> {
        safe_normalize(self.eye.to_vec())
    }

    pub fn fovy_deg(&self) -> f64 {
        self.fovy.0
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_wh = (width.max(0.0), height.max(0.0));
        if height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn viewport(&self) -> (f64, f64) {
        self.viewport_wh
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(self.eye, self.target(), self.safe_up())
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        cgmath::perspective(self.fovy, self.aspect, self.near, self.far)
    }

    /// World-space rotation of the camera. Billboards copy it so they always
    /// face the viewer regardless of how the globe is oriented.
    pub fn rotation(&self) -> Quaternion<f64> {
        let Some(back) = self.direction() else {
            return Quaternion::new(1.0, 0.0, 0.0, 0.0);
        };
        let up = self.safe_up();
        let right = up.cross(back).normalize();
        let true_up = back.cross(right);
        Quaternion::from(Matrix3::from_cols(right, true_up, back))
    }

    // Falls back to +z when the eye sits on the y axis.
    fn safe_up(&self) -> Vector3<f64> {
        match self.direction() {
            Some(dir) if dir.cross(self.up).magnitude2() > 1e-12 => self.up,
            Some(_) => Vector3::unit_z(),
            None => {
                if self.up.is_zero() {
                    Vector3::unit_y()
                } else {
                    self.up
                }
            }
        }
    }
}
