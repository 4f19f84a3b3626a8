use bevy::prelude::*;

use crate::input::{InputEvent, InputSource};

use super::{CameraRig, MouseLook};

/// Free-fly camera: mouse look plus six-axis keyboard movement.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeCamera {
    /// Shared camera state.
    pub rig: CameraRig,
    /// Movement speed in units per second.
    pub speed: f32,
    /// Arrow-key turn rate in radians per second.
    pub turn_speed: f32,
    /// Field of view change per scroll unit, in degrees.
    pub zoom_sensitivity: f32,
    /// Mouse look settings.
    pub look: MouseLook,
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self::new(CameraRig::default())
    }
}

impl FreeCamera {
    pub fn new(rig: CameraRig) -> Self {
        Self {
            rig,
            speed: 5.0,
            turn_speed: 1.0,
            zoom_sensitivity: 2.0,
            look: MouseLook::default(),
        }
    }

    /// Set the movement speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Handle mouse motion and scroll.
    pub fn on_input(&mut self, event: &InputEvent, input: &impl InputSource) {
        match *event {
            InputEvent::MouseMoved(position) => {
                self.look.on_mouse_move(&mut self.rig, position, input);
            }
            InputEvent::MouseScrolled(delta) => {
                self.rig.zoom(-delta.y * self.zoom_sensitivity);
            }
            _ => {}
        }
    }

    /// Apply held movement and turn keys.
    ///
    /// - W/S: forward/back
    /// - A/D: left/right
    /// - Q/E: up/down
    /// - Arrow keys: turn
    pub fn update(&mut self, delta_secs: f32, input: &impl InputSource) {
        let turn = self.turn_speed * delta_secs;
        let d_yaw = input.axis(KeyCode::ArrowLeft, KeyCode::ArrowRight) * turn;
        let d_pitch = input.axis(KeyCode::ArrowUp, KeyCode::ArrowDown) * turn;
        if d_yaw != 0.0 || d_pitch != 0.0 {
            self.rig.rotate(d_pitch, d_yaw);
        }

        let direction = self.rig.forward() * input.axis(KeyCode::KeyW, KeyCode::KeyS)
            + self.rig.right() * input.axis(KeyCode::KeyD, KeyCode::KeyA)
            + self.rig.up() * input.axis(KeyCode::KeyQ, KeyCode::KeyE);

        if direction != Vec3::ZERO {
            self.rig
                .move_by(direction.normalize() * self.speed * delta_secs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveParams;
    use crate::input::HeldInputs;

    fn facing_z() -> FreeCamera {
        FreeCamera::new(CameraRig::new(Vec3::ZERO, Vec3::Z, PerspectiveParams::default()))
    }

    #[test]
    fn test_forward_movement_scales_with_time() {
        let mut camera = facing_z();
        let held = HeldInputs::new().with_key(KeyCode::KeyW);
        camera.update(0.5, &held);
        assert!((camera.rig.position - Vec3::new(0.0, 0.0, 2.5)).length() < 1e-5);
    }

    #[test]
    fn test_strafe_and_lift() {
        let mut camera = facing_z();
        let held = HeldInputs::new().with_key(KeyCode::KeyD);
        camera.update(1.0, &held);
        // Facing +Z, screen right is -X.
        assert!((camera.rig.position - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-4);

        let mut camera = facing_z();
        let held = HeldInputs::new().with_key(KeyCode::KeyE);
        camera.update(1.0, &held);
        assert!((camera.rig.position - Vec3::new(0.0, -5.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_no_keys_no_motion() {
        let mut camera = facing_z();
        camera.update(1.0, &HeldInputs::new());
        assert_eq!(camera.rig.position, Vec3::ZERO);
    }

    #[test]
    fn test_scroll_zooms() {
        let mut camera = facing_z();
        let before = camera.rig.projection.fov_degrees;
        camera.on_input(&InputEvent::MouseScrolled(Vec2::new(0.0, 1.0)), &HeldInputs::new());
        assert!(camera.rig.projection.fov_degrees < before);
    }
}
