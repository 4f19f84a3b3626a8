use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::error::Result;
use crate::input::{InputEvent, InputSource};
use crate::spline::{Spline, SplineRegistry};

use super::{ModeSettings, SplineCamState, StateKind};

/// Position and direction of the editor's preview marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewPoint {
    pub position: Vec3,
    /// Unit tangent at the marker.
    pub tangent: Vec3,
}

/// Spline overlay requested by the active state.
#[derive(Debug, Clone, Copy)]
pub struct SplineView<'a> {
    pub spline: &'a Spline,
    /// Highlighted control point.
    pub selected: Option<usize>,
    /// Draw orientation overrides as arrows.
    pub show_orientations: bool,
    /// Draw every adaptive sample point.
    pub show_samples: bool,
    pub preview: Option<PreviewPoint>,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    /// Active camera.
    pub rig: &'a CameraRig,
    /// `projection * view` of the active camera.
    pub view_projection: Mat4,
    /// Draw the scene as wireframe.
    pub wireframe: bool,
    pub spline: Option<SplineView<'a>>,
}

/// Owns the active camera state and routes input, updates and rendering to it.
///
/// Number keys 1-3 switch states and F1 toggles wireframe; these never
/// reach the active state. Switching stops the old state before the new
/// one starts, and selecting the active state again does nothing.
#[derive(Resource, Debug, Clone, Default)]
pub struct ModeController {
    settings: ModeSettings,
    active: Option<SplineCamState>,
    wireframe: bool,
}

impl ModeController {
    pub fn new(settings: ModeSettings) -> Self {
        Self {
            settings,
            active: None,
            wireframe: false,
        }
    }

    pub fn settings(&self) -> &ModeSettings {
        &self.settings
    }

    pub fn active(&self) -> Option<&SplineCamState> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut SplineCamState> {
        self.active.as_mut()
    }

    pub fn active_kind(&self) -> Option<StateKind> {
        self.active.as_ref().map(SplineCamState::kind)
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
        debug!("Wireframe {}", if self.wireframe { "on" } else { "off" });
    }

    /// Switch to `kind`. Returns `Ok(false)` if it was already active.
    ///
    /// If the new state fails to start, the old state has already been
    /// stopped and no state is active afterwards.
    pub fn select_mode(&mut self, kind: StateKind, registry: &mut SplineRegistry) -> Result<bool> {
        if self.active_kind() == Some(kind) {
            return Ok(false);
        }

        if let Some(mut previous) = self.active.take() {
            previous.stop();
        }

        let state = SplineCamState::start(kind, &self.settings, registry)?;
        info!("Switched to {} mode", kind.name());
        self.active = Some(state);
        Ok(true)
    }

    /// Handle one input event.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        input: &impl InputSource,
        registry: &mut SplineRegistry,
    ) -> Result<()> {
        if let InputEvent::KeyPressed(key) = *event {
            if let Some(kind) = StateKind::from_key(key) {
                self.select_mode(kind, registry)?;
                return Ok(());
            }
            if key == KeyCode::F1 {
                self.toggle_wireframe();
                return Ok(());
            }
        }

        if let Some(state) = self.active.as_mut() {
            state.on_input(event, input, registry);
        }
        Ok(())
    }

    /// Advance the active state by one frame.
    pub fn update(&mut self, delta_secs: f32, input: &impl InputSource, registry: &mut SplineRegistry) {
        if let Some(state) = self.active.as_mut() {
            state.update(delta_secs.max(0.0), input, registry);
        }
    }

    /// Describe the frame to draw, or `None` before any state is selected.
    pub fn render<'a>(&'a self, registry: &'a SplineRegistry) -> Option<RenderFrame<'a>> {
        let state = self.active.as_ref()?;
        let rig = state.camera().rig();
        Some(RenderFrame {
            rig,
            view_projection: rig.view_projection(),
            wireframe: self.wireframe,
            spline: state.spline_view(registry),
        })
    }

    /// Apply a new viewport aspect ratio to current and future cameras.
    pub fn set_aspect(&mut self, aspect: f32) {
        if !(aspect.is_finite() && aspect > 0.0) {
            return;
        }
        self.settings.projection.aspect = aspect;
        if let Some(state) = self.active.as_mut() {
            state.camera_mut().rig_mut().set_aspect(aspect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HeldInputs;

    fn key(key: KeyCode) -> InputEvent {
        InputEvent::KeyPressed(key)
    }

    #[test]
    fn test_starts_without_state() {
        let controller = ModeController::default();
        let registry = SplineRegistry::new(1);
        assert_eq!(controller.active_kind(), None);
        assert!(controller.render(&registry).is_none());
    }

    #[test]
    fn test_number_keys_switch_modes() {
        let mut controller = ModeController::default();
        let mut registry = SplineRegistry::new(1);
        let held = HeldInputs::new();

        controller.handle_input(&key(KeyCode::Digit2), &held, &mut registry).unwrap();
        assert_eq!(controller.active_kind(), Some(StateKind::SplineEditor));
        assert!(registry.contains(0));

        controller.handle_input(&key(KeyCode::Digit3), &held, &mut registry).unwrap();
        assert_eq!(controller.active_kind(), Some(StateKind::FollowSpline));

        controller.handle_input(&key(KeyCode::Digit1), &held, &mut registry).unwrap();
        assert_eq!(controller.active_kind(), Some(StateKind::FreeCam));
    }

    #[test]
    fn test_reselecting_keeps_state() {
        let mut controller = ModeController::default();
        let mut registry = SplineRegistry::new(1);
        assert!(controller.select_mode(StateKind::FreeCam, &mut registry).unwrap());

        let held = HeldInputs::new().with_key(KeyCode::KeyW);
        controller.update(1.0, &held, &mut registry);
        let moved = controller.active().unwrap().camera().rig().position;

        assert!(!controller.select_mode(StateKind::FreeCam, &mut registry).unwrap());
        assert_eq!(controller.active().unwrap().camera().rig().position, moved);
    }

    #[test]
    fn test_editor_and_follower_share_spline() {
        let mut controller = ModeController::default();
        let mut registry = SplineRegistry::new(1);
        let held = HeldInputs::new();

        controller.select_mode(StateKind::SplineEditor, &mut registry).unwrap();
        controller.handle_input(&key(KeyCode::Space), &held, &mut registry).unwrap();
        let count = registry.get(0).unwrap().control_points().len();

        controller.select_mode(StateKind::FollowSpline, &mut registry).unwrap();
        controller.select_mode(StateKind::SplineEditor, &mut registry).unwrap();
        assert_eq!(registry.get(0).unwrap().control_points().len(), count);
    }

    #[test]
    fn test_mode_keys_are_not_forwarded() {
        let mut controller = ModeController::default();
        let mut registry = SplineRegistry::new(1);
        controller.select_mode(StateKind::SplineEditor, &mut registry).unwrap();
        let held = HeldInputs::new();

        let preview_t = |controller: &ModeController| match controller.active() {
            Some(SplineCamState::SplineEditor(state)) => state.preview().t,
            _ => panic!("editor is not active"),
        };

        // Ordinary keys reach the editor.
        controller.handle_input(&key(KeyCode::Tab), &held, &mut registry).unwrap();
        assert_eq!(registry.get(0).unwrap().selected_index(), 1);
        controller.update(2.0, &held, &mut registry);
        let t = preview_t(&controller);
        assert!(t > 0.0);

        // Reselecting the active mode neither restarts nor drives the editor.
        controller.handle_input(&key(KeyCode::Digit2), &held, &mut registry).unwrap();
        assert_eq!(controller.active_kind(), Some(StateKind::SplineEditor));
        assert_eq!(preview_t(&controller), t);
        assert_eq!(registry.get(0).unwrap().selected_index(), 1);

        controller.handle_input(&key(KeyCode::F1), &held, &mut registry).unwrap();
        assert!(controller.wireframe());
        assert!(controller.render(&registry).unwrap().wireframe);
        assert_eq!(preview_t(&controller), t);
        assert_eq!(registry.get(0).unwrap().selected_index(), 1);

        // Leaving stops the editor without forwarding the key to it.
        controller.handle_input(&key(KeyCode::Digit1), &held, &mut registry).unwrap();
        assert_eq!(controller.active_kind(), Some(StateKind::FreeCam));
        assert_eq!(registry.get(0).unwrap().selected_index(), 1);
    }

    #[test]
    fn test_failed_start_leaves_no_state() {
        let mut controller = ModeController::default();
        let mut registry = SplineRegistry::new(0);
        controller.select_mode(StateKind::FreeCam, &mut registry).unwrap();
        assert!(controller.select_mode(StateKind::FollowSpline, &mut registry).is_err());
        assert_eq!(controller.active_kind(), None);
    }

    #[test]
    fn test_render_uses_active_camera() {
        let mut controller = ModeController::default();
        let mut registry = SplineRegistry::new(1);
        controller.select_mode(StateKind::SplineEditor, &mut registry).unwrap();

        let frame = controller.render(&registry).unwrap();
        assert_eq!(frame.view_projection, frame.rig.view_projection());
        assert!(frame.spline.is_some());

        controller.select_mode(StateKind::FreeCam, &mut registry).unwrap();
        assert!(controller.render(&registry).unwrap().spline.is_none());
    }

    #[test]
    fn test_set_aspect_reaches_active_and_future_cameras() {
        let mut controller = ModeController::default();
        let mut registry = SplineRegistry::new(1);
        controller.select_mode(StateKind::FreeCam, &mut registry).unwrap();
        controller.set_aspect(2.0);
        assert_eq!(controller.active().unwrap().camera().rig().projection.aspect, 2.0);

        controller.select_mode(StateKind::FollowSpline, &mut registry).unwrap();
        assert_eq!(controller.active().unwrap().camera().rig().projection.aspect, 2.0);

        controller.set_aspect(f32::NAN);
        assert_eq!(controller.settings().projection.aspect, 2.0);
    }
}
