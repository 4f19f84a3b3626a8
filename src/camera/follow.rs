use bevy::prelude::*;

use crate::geometry::CoordinateFrame;
use crate::playback::AnimationCursor;
use crate::spline::Spline;

use super::{CameraRig, PerspectiveParams};

/// Camera that rides a spline, facing along its tangent.
///
/// Manual input is ignored. Each update advances the cursor and places the
/// eye on the curve; the spline's tangent supplies the orientation instead
/// of accumulated yaw and pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowSplineCamera {
    /// Shared camera state.
    pub rig: CameraRig,
    /// Position along the curve and playback flags.
    pub cursor: AnimationCursor,
    /// Height of the eye above the curve, along the frame's up vector.
    pub eye_offset: f32,
}

impl FollowSplineCamera {
    /// Create a camera placed on `spline` at the cursor's position.
    pub fn new(spline: &Spline, projection: PerspectiveParams, cursor: AnimationCursor) -> Self {
        let mut camera = Self {
            rig: CameraRig::new(Vec3::ZERO, Vec3::Z, projection),
            cursor,
            eye_offset: 0.0,
        };
        camera.snap_to(spline);
        camera
    }

    /// Set the eye height above the curve.
    pub fn with_eye_offset(mut self, offset: f32) -> Self {
        self.eye_offset = offset;
        self
    }

    pub fn t(&self) -> f32 {
        self.cursor.t
    }

    /// Advance the cursor and move onto the curve.
    pub fn update(&mut self, delta_secs: f32, spline: &Spline) {
        self.cursor.advance(delta_secs);
        self.snap_to(spline);
    }

    /// Place the eye at the cursor without advancing.
    pub fn snap_to(&mut self, spline: &Spline) {
        let t = self.cursor.t;
        let frame = CoordinateFrame::from_forward(spline.tangent(t));
        self.rig.position = frame.transform_point(spline.point(t), Vec3::Y * self.eye_offset);
        self.rig.look_along(frame.forward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline::SplinePreset;

    #[test]
    fn test_starts_on_curve_facing_tangent() {
        let spline = SplinePreset::DemoRoom.build().unwrap();
        let camera = FollowSplineCamera::new(&spline, default(), AnimationCursor::default());

        assert!((camera.rig.position - spline.point(0.0)).length() < 1e-5);
        assert!((camera.rig.forward() - spline.tangent(0.0)).length() < 1e-4);
    }

    #[test]
    fn test_update_advances_and_wraps() {
        let spline = SplinePreset::LoopTrack.build().unwrap();
        let cursor = AnimationCursor::new(0.25).with_start_t(0.9);
        let mut camera = FollowSplineCamera::new(&spline, default(), cursor);

        camera.update(1.0, &spline);
        assert!((camera.t() - 0.15).abs() < 1e-5);
        assert!((camera.rig.position - spline.point(0.15)).length() < 1e-4);
    }

    #[test]
    fn test_paused_camera_stays() {
        let spline = SplinePreset::DemoRoom.build().unwrap();
        let mut camera = FollowSplineCamera::new(&spline, default(), AnimationCursor::default());
        camera.cursor.paused = true;
        let before = camera.rig.position;
        camera.update(3.0, &spline);
        assert_eq!(camera.rig.position, before);
    }

    #[test]
    fn test_eye_offset_lifts_camera() {
        let spline = SplinePreset::DemoRoom.build().unwrap();
        let mut camera = FollowSplineCamera::new(&spline, default(), AnimationCursor::default())
            .with_eye_offset(0.5);
        camera.snap_to(&spline);
        assert!(camera.rig.position.y > spline.point(0.0).y);
    }
}
