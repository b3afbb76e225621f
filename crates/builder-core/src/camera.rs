//! Camera pose, projection and a damped orbit controller.

use crate::constants::{
    camera_default_position, camera_default_target, CAMERA_FOVY_RADIANS, CAMERA_ZFAR,
    CAMERA_ZNEAR, ORBIT_DAMPING_FACTOR, ORBIT_MAX_POLAR, ORBIT_MAX_RADIUS, ORBIT_MIN_POLAR,
    ORBIT_MIN_RADIUS, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// Position plus Euler XYZ rotation in radians; what gets persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl CameraPose {
    /// Pose at `position` whose forward (-Z) axis points at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let view = Mat4::look_at_rh(position, target, Vec3::Y);
        let (_, q, _) = view.inverse().to_scale_rotation_translation();
        let (x, y, z) = q.to_euler(EulerRot::XYZ);
        Self {
            position,
            rotation: Vec3::new(x, y, z),
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::looking_at(camera_default_position(), camera_default_target())
    }
}

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub pose: CameraPose,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pose: CameraPose::default(),
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.pose.orientation(), self.pose.position).inverse()
    }

    /// World-space ray through a point given in normalized device coordinates.
    ///
    /// Returns `(origin, direction)`, direction normalized.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        (self.pose.position, (far - near).normalize())
    }

    /// NDC of a world point, or `None` when it lies behind the camera.
    pub fn project(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.projection_matrix() * self.view_matrix() * point.extend(1.0);
        (clip.w > 1e-6).then(|| clip.truncate() / clip.w)
    }
}

/// Spherical orbit around a target with per-tick damping, in the manner of
/// typical web orbit controls: input accumulates pending rotation and each
/// frame applies a fraction of it.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub damping_factor: f32,
    radius: f32,
    theta: f32,
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    enabled: bool,
    dirty: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(camera_default_target(), &CameraPose::default())
    }
}

impl OrbitControls {
    pub fn new(target: Vec3, pose: &CameraPose) -> Self {
        let mut c = Self {
            target,
            damping_factor: ORBIT_DAMPING_FACTOR,
            radius: 1.0,
            theta: 0.0,
            phi: 0.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            enabled: true,
            dirty: false,
        };
        c.sync_from_pose(pose);
        c
    }

    /// Re-derive the spherical state from a pose set from outside (hard cut).
    pub fn sync_from_pose(&mut self, pose: &CameraPose) {
        let offset = pose.position - self.target;
        self.radius = offset.length().max(ORBIT_MIN_RADIUS);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.dirty = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!("[orbit] enabled={}", enabled);
        }
        self.enabled = enabled;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Queue rotation for a pointer drag of `delta` NDC units. Ignored while suspended.
    pub fn rotate_by(&mut self, delta: Vec2) {
        if !self.enabled {
            return;
        }
        self.pending_theta -= delta.x * ORBIT_ROTATE_SPEED;
        self.pending_phi += delta.y * ORBIT_ROTATE_SPEED;
    }

    /// Dolly in (`notches < 0`) or out. Ignored while suspended.
    pub fn zoom_by(&mut self, notches: f32) {
        if !self.enabled {
            return;
        }
        self.radius =
            (self.radius * ORBIT_ZOOM_SPEED.powf(-notches)).clamp(ORBIT_MIN_RADIUS, ORBIT_MAX_RADIUS);
        self.dirty = true;
    }

    /// Advance damping by `dt` seconds and write the camera pose when it moved.
    pub fn update(&mut self, camera: &mut Camera, dt: f32) -> bool {
        let pending = self.pending_theta.abs() > 1e-6 || self.pending_phi.abs() > 1e-6;
        if !pending && !self.dirty {
            return false;
        }
        // Damping is tuned per 60 Hz frame.
        let frames = (dt * 60.0).max(0.0);
        let keep = (1.0 - self.damping_factor).powf(frames);
        let step_theta = self.pending_theta * (1.0 - keep);
        let step_phi = self.pending_phi * (1.0 - keep);
        self.pending_theta -= step_theta;
        self.pending_phi -= step_phi;
        self.theta += step_theta;
        self.phi = (self.phi + step_phi).clamp(ORBIT_MIN_POLAR, ORBIT_MAX_POLAR);
        self.dirty = false;

        let offset = Vec3::new(
            self.phi.sin() * self.theta.sin(),
            self.phi.cos(),
            self.phi.sin() * self.theta.cos(),
        ) * self.radius;
        camera.pose = CameraPose::looking_at(self.target + offset, self.target);
        true
    }
}
