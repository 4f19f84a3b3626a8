use bevy::prelude::*;

use crate::camera::{CameraKind, FirstPersonCamera, FreeCamera};
use crate::input::{InputEvent, InputSource};

use super::ModeSettings;

/// Fly or walk around the scene.
///
/// F switches between the free-fly and first-person cameras, keeping the
/// eye position and view direction.
#[derive(Debug, Clone)]
pub struct FreeCamState {
    camera: CameraKind,
}

impl FreeCamState {
    pub fn start(settings: &ModeSettings) -> Self {
        Self {
            camera: CameraKind::Free(FreeCamera::new(settings.start_rig())),
        }
    }

    pub fn camera(&self) -> &CameraKind {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraKind {
        &mut self.camera
    }

    pub fn update(&mut self, delta_secs: f32, input: &impl InputSource) {
        self.camera.update(delta_secs, input, None);
    }

    pub fn on_input(&mut self, event: &InputEvent, input: &impl InputSource) {
        match event {
            InputEvent::KeyPressed(KeyCode::KeyF) => self.toggle_camera(),
            _ => self.camera.on_input(event, input),
        }
    }

    /// Swap between the free-fly and first-person cameras.
    pub fn toggle_camera(&mut self) {
        let rig = self.camera.rig().clone();
        self.camera = match self.camera {
            CameraKind::FirstPerson(_) | CameraKind::FollowSpline(_) => {
                CameraKind::Free(FreeCamera::new(rig))
            }
            CameraKind::Free(_) => CameraKind::FirstPerson(FirstPersonCamera::new(rig)),
        };
        info!("Free cam using {} camera", self.camera.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HeldInputs;

    #[test]
    fn test_starts_free_at_configured_position() {
        let settings = ModeSettings::default();
        let state = FreeCamState::start(&settings);
        assert!(matches!(state.camera(), CameraKind::Free(_)));
        assert_eq!(state.camera().rig().position, settings.start_position);
    }

    #[test]
    fn test_f_toggles_camera_keeping_pose() {
        let mut state = FreeCamState::start(&ModeSettings::default());
        let held = HeldInputs::new().with_key(KeyCode::KeyW);
        state.update(1.0, &held);
        let pose = state.camera().rig().clone();

        state.on_input(&InputEvent::KeyPressed(KeyCode::KeyF), &HeldInputs::new());
        assert!(matches!(state.camera(), CameraKind::FirstPerson(_)));
        assert_eq!(state.camera().rig(), &pose);

        state.on_input(&InputEvent::KeyPressed(KeyCode::KeyF), &HeldInputs::new());
        assert!(matches!(state.camera(), CameraKind::Free(_)));
    }

    #[test]
    fn test_other_keys_do_not_switch() {
        let mut state = FreeCamState::start(&ModeSettings::default());
        state.on_input(&InputEvent::KeyPressed(KeyCode::KeyG), &HeldInputs::new());
        assert!(matches!(state.camera(), CameraKind::Free(_)));
    }
}
