mod first_person;
mod fly;
mod follow;

pub use first_person::FirstPersonCamera;
pub use fly::FreeCamera;
pub use follow::FollowSplineCamera;

use bevy::prelude::*;

use crate::geometry::CoordinateFrame;
use crate::input::{InputEvent, InputSource};
use crate::playback::AnimationCursor;
use crate::spline::Spline;

/// Pitch limit for yaw/pitch driven cameras (prevents flipping).
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.1;

/// Narrowest and widest field of view reachable by zooming, in degrees.
pub const FOV_RANGE: (f32, f32) = (10.0, 120.0);

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveParams {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Width over height.
    pub aspect: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for PerspectiveParams {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            aspect: 1024.0 / 768.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveParams {
    /// Right-handed, OpenGL-depth projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Position, orientation and projection shared by every camera variant.
///
/// Orientation is accumulated as yaw (about world up) and pitch, and
/// converted to a forward vector with
/// `(cos(pitch)·sin(yaw), sin(pitch), cos(pitch)·cos(yaw))`.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    /// Eye position.
    pub position: Vec3,
    /// Projection parameters.
    pub projection: PerspectiveParams,
    frame: CoordinateFrame,
    yaw: f32,
    pitch: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.0, -15.0), Vec3::ZERO, PerspectiveParams::default())
    }
}

impl CameraRig {
    /// Create a rig at `position` looking towards `focus`.
    pub fn new(position: Vec3, focus: Vec3, projection: PerspectiveParams) -> Self {
        let mut rig = Self {
            position,
            projection,
            frame: CoordinateFrame::default(),
            yaw: 0.0,
            pitch: 0.0,
        };
        rig.look_along(focus - position);
        rig
    }

    pub fn forward(&self) -> Vec3 {
        self.frame.forward
    }

    pub fn right(&self) -> Vec3 {
        self.frame.right
    }

    pub fn up(&self) -> Vec3 {
        self.frame.up
    }

    pub fn frame(&self) -> &CoordinateFrame {
        &self.frame
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// The point one unit in front of the eye.
    pub fn focus_point(&self) -> Vec3 {
        self.position + self.frame.forward
    }

    /// Translate the eye.
    pub fn move_by(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Add to pitch and yaw (radians) and rebuild the basis.
    pub fn rotate(&mut self, d_pitch: f32, d_yaw: f32) {
        self.pitch = (self.pitch + d_pitch).clamp(-MAX_PITCH, MAX_PITCH);
        self.yaw += d_yaw;
        self.update_orientation_vectors();
    }

    /// Rebuild forward, right and up from yaw and pitch.
    pub fn update_orientation_vectors(&mut self) {
        let forward = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.frame = CoordinateFrame::from_forward(forward);
    }

    /// Point the camera along `direction`, bypassing yaw/pitch limits.
    ///
    /// Yaw and pitch are re-derived so manual rotation continues smoothly.
    pub fn look_along(&mut self, direction: Vec3) {
        self.frame = CoordinateFrame::from_forward(direction);
        let forward = self.frame.forward;
        self.pitch = forward.y.clamp(-1.0, 1.0).asin();
        self.yaw = forward.x.atan2(forward.z);
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.focus_point(), self.frame.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// `projection * view`.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio; ignores non-positive or non-finite values.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.projection.aspect = aspect;
        }
    }

    /// Narrow (negative) or widen (positive) the field of view.
    pub fn zoom(&mut self, delta_degrees: f32) {
        self.projection.fov_degrees =
            (self.projection.fov_degrees + delta_degrees).clamp(FOV_RANGE.0, FOV_RANGE.1);
    }

    /// Equivalent Bevy transform for a `Camera3d`.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_to(self.frame.forward, self.frame.up)
    }
}

/// Mouse-look shared by the manually driven cameras.
///
/// Cursor positions are absolute; the delta to the previous position turns
/// the rig only while the look button is held.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseLook {
    /// Radians per pixel of cursor travel.
    pub sensitivity: f32,
    /// Button that must be held to look around.
    pub button: MouseButton,
    last_cursor: Option<Vec2>,
}

impl Default for MouseLook {
    fn default() -> Self {
        Self {
            sensitivity: 0.005,
            button: MouseButton::Left,
            last_cursor: None,
        }
    }
}

impl MouseLook {
    /// Feed a new cursor position.
    pub fn on_mouse_move(&mut self, rig: &mut CameraRig, position: Vec2, input: &impl InputSource) {
        if let Some(last) = self.last_cursor {
            if input.button_held(self.button) {
                let delta = position - last;
                rig.rotate(-delta.y * self.sensitivity, -delta.x * self.sensitivity);
            }
        }
        self.last_cursor = Some(position);
    }
}

/// The camera variants a state can own.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraKind {
    /// Free-fly camera.
    Free(FreeCamera),
    /// Ground-bound first-person camera.
    FirstPerson(FirstPersonCamera),
    /// Camera riding a spline.
    FollowSpline(FollowSplineCamera),
}

impl CameraKind {
    /// Get the display name for this camera.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Free(_) => "Free",
            Self::FirstPerson(_) => "First Person",
            Self::FollowSpline(_) => "Follow Spline",
        }
    }

    /// Advance one frame. Only the follow camera reads `spline`.
    pub fn update(&mut self, delta_secs: f32, input: &impl InputSource, spline: Option<&Spline>) {
        match self {
            Self::Free(camera) => camera.update(delta_secs, input),
            Self::FirstPerson(camera) => camera.update(delta_secs, input),
            Self::FollowSpline(camera) => {
                if let Some(spline) = spline {
                    camera.update(delta_secs, spline);
                }
            }
        }
    }

    /// Respond to a discrete input event.
    pub fn on_input(&mut self, event: &InputEvent, input: &impl InputSource) {
        match self {
            Self::Free(camera) => camera.on_input(event, input),
            Self::FirstPerson(camera) => camera.on_input(event, input),
            Self::FollowSpline(_) => {}
        }
    }

    pub fn rig(&self) -> &CameraRig {
        match self {
            Self::Free(camera) => &camera.rig,
            Self::FirstPerson(camera) => &camera.rig,
            Self::FollowSpline(camera) => &camera.rig,
        }
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        match self {
            Self::Free(camera) => &mut camera.rig,
            Self::FirstPerson(camera) => &mut camera.rig,
            Self::FollowSpline(camera) => &mut camera.rig,
        }
    }

    /// Playback cursor of a spline-following camera.
    pub fn cursor(&self) -> Option<&AnimationCursor> {
        match self {
            Self::FollowSpline(camera) => Some(&camera.cursor),
            _ => None,
        }
    }

    pub fn cursor_mut(&mut self) -> Option<&mut AnimationCursor> {
        match self {
            Self::FollowSpline(camera) => Some(&mut camera.cursor),
            _ => None,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.rig().view_projection()
    }
}
