//! First-person camera.

use bytemuck::{Pod, Zeroable};
use engine_core::Transform;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// FPS camera with configurable FOV and clipping planes.
///
/// The camera sits on a rig: `transform.position` is the eye in rig-local
/// space and `rig_yaw`/`rig_position` place the rig in the world (VR stick
/// turning rotates the rig, not the head).
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye transform relative to the rig.
    pub transform: Transform,
    /// Rig origin in world space.
    pub rig_position: Vec3,
    /// Rig yaw in radians (VR smooth turning).
    pub rig_yaw: f32,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Mouse sensitivity for look controls.
    pub sensitivity: f32,
    /// Current pitch (up/down rotation) in radians.
    pitch: f32,
    /// Current yaw (left/right rotation) in radians.
    yaw: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            rig_position: Vec3::ZERO,
            rig_yaw: 0.0,
            fov_degrees: 70.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
            sensitivity: 0.002,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl Camera {
    /// Create a new camera with the eye at the given rig-local position.
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ..Default::default()
        }
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Process mouse movement for FPS look controls.
    pub fn process_mouse(&mut self, delta_x: f32, delta_y: f32) {
        self.set_yaw_pitch(
            self.yaw - delta_x * self.sensitivity,
            self.pitch - delta_y * self.sensitivity,
        );
    }

    /// Set yaw and pitch directly (in radians) and rebuild rotation.
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        // Clamp pitch to prevent flipping
        let max_pitch = std::f32::consts::FRAC_PI_2 - 0.01;
        self.pitch = pitch.clamp(-max_pitch, max_pitch);
        self.transform.rotation =
            Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch);
    }

    /// Get current yaw (left/right rotation) in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch (up/down rotation) in radians.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// World-space rotation including the rig yaw.
    pub fn world_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.rig_yaw) * self.transform.rotation
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.rig_position + Quat::from_rotation_y(self.rig_yaw) * self.transform.position
    }

    /// World-space forward direction.
    pub fn forward(&self) -> Vec3 {
        self.world_rotation() * -Vec3::Z
    }

    /// World-space right direction.
    pub fn right(&self) -> Vec3 {
        self.world_rotation() * Vec3::X
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.position();
        let target = eye + self.forward();
        Mat4::look_at_rh(eye, target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray through the crosshair (screen center): eye origin, forward direction.
    pub fn crosshair_ray(&self) -> (Vec3, Vec3) {
        (self.position(), self.forward())
    }

    /// Ray through a point in normalized device coordinates (x, y in -1..1,
    /// y up). Used for mouse picking when the cursor is unlocked.
    pub fn ndc_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection_matrix().inverse();
        let near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        (near, (far - near).normalize_or_zero())
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.proj = camera.projection_matrix().to_cols_array_2d();
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        let pos = camera.position();
        self.position = [pos.x, pos.y, pos.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::default();
        cam.set_yaw_pitch(0.0, 10.0);
        assert!(cam.pitch() < std::f32::consts::FRAC_PI_2);
        cam.set_yaw_pitch(0.0, -10.0);
        assert!(cam.pitch() > -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn rig_yaw_rotates_eye_position() {
        let mut cam = Camera::new(Vec3::new(0.0, 1.7, -2.0));
        cam.rig_position = Vec3::new(10.0, 0.0, 0.0);
        cam.rig_yaw = std::f32::consts::PI;
        let p = cam.position();
        assert!((p - Vec3::new(10.0, 1.7, 2.0)).length() < 1e-5);
    }

    #[test]
    fn center_ndc_ray_matches_crosshair() {
        let mut cam = Camera::new(Vec3::new(1.0, 1.7, 3.0));
        cam.set_yaw_pitch(0.7, -0.2);
        let (o_cross, d_cross) = cam.crosshair_ray();
        let (o_ndc, d_ndc) = cam.ndc_ray(Vec2::ZERO);
        // NDC ray starts on the near plane along the same line.
        assert!((d_cross - d_ndc).length() < 1e-3);
        assert!(((o_ndc - o_cross).normalize() - d_cross).length() < 1e-3);
    }

    #[test]
    fn uniform_tracks_camera() {
        let mut cam = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        cam.set_yaw_pitch(1.0, 0.0);
        let mut uniform = CameraUniform::new();
        uniform.update(&cam);
        assert_eq!(uniform.position[1], 1.7);
        assert_eq!(
            uniform.view_proj,
            cam.view_projection_matrix().to_cols_array_2d()
        );
    }
}
