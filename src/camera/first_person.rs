use bevy::prelude::*;

use crate::input::{InputEvent, InputSource};

use super::{CameraRig, MouseLook};

/// Walking camera: mouse look, with W/A/S/D movement kept on the ground plane.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPersonCamera {
    /// Shared camera state.
    pub rig: CameraRig,
    /// Walking speed in units per second.
    pub speed: f32,
    /// Mouse look settings.
    pub look: MouseLook,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self::new(CameraRig::default())
    }
}

impl FirstPersonCamera {
    pub fn new(rig: CameraRig) -> Self {
        Self {
            rig,
            speed: 4.0,
            look: MouseLook::default(),
        }
    }

    pub fn on_input(&mut self, event: &InputEvent, input: &impl InputSource) {
        if let InputEvent::MouseMoved(position) = *event {
            self.look.on_mouse_move(&mut self.rig, position, input);
        }
    }

    pub fn update(&mut self, delta_secs: f32, input: &impl InputSource) {
        let forward = flatten(self.rig.forward());
        let right = flatten(self.rig.right());

        let direction = forward * input.axis(KeyCode::KeyW, KeyCode::KeyS)
            + right * input.axis(KeyCode::KeyD, KeyCode::KeyA);

        if let Some(direction) = direction.try_normalize() {
            self.rig.move_by(direction * self.speed * delta_secs);
        }
    }
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}
