use bevy::prelude::*;

use crate::camera::{CameraKind, FreeCamera};
use crate::error::Result;
use crate::input::{InputEvent, InputSource};
use crate::playback::AnimationCursor;
use crate::spline::SplineRegistry;

use super::{ModeSettings, PreviewPoint, SplineSource, SplineView};

/// Edit the shared spline while flying around it.
///
/// Hotkeys:
/// - Tab / Shift+Tab: select next / previous control point
/// - Space: insert a control point at the preview marker
/// - Shift+Space: delete the selected control point
/// - Shift+W/S, Shift+A/D, Shift+Q/E: move the selected point along Y, X, Z
/// - Shift+Arrows: turn the selected point's orientation override
/// - Backspace: clear the selected point's orientation override
/// - C: toggle cyclic/clamped
/// - G: show adaptive sample points
/// - P: pause the preview marker, R/F (held): rewind / fast-forward it
///
/// The camera does not move while Shift is held.
#[derive(Debug, Clone)]
pub struct SplineEditorState {
    camera: CameraKind,
    source: SplineSource,
    preview: AnimationCursor,
    show_samples: bool,
    translate_speed: f32,
    rotate_speed: f32,
}

impl SplineEditorState {
    /// Start editing, creating the spline from its preset if the slot is empty.
    pub fn start(settings: &ModeSettings, registry: &mut SplineRegistry) -> Result<Self> {
        let spline = settings.editor_spline.acquire(registry)?;
        debug!(
            "Editing spline in slot {} ({} control points)",
            settings.editor_spline.slot,
            spline.control_points().len()
        );

        Ok(Self {
            camera: CameraKind::Free(FreeCamera::new(settings.start_rig())),
            source: settings.editor_spline,
            preview: AnimationCursor::new(settings.playback_speed),
            show_samples: false,
            translate_speed: settings.edit_translate_speed,
            rotate_speed: settings.edit_rotate_speed,
        })
    }

    pub fn camera(&self) -> &CameraKind {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraKind {
        &mut self.camera
    }

    /// The preview marker's playback cursor.
    pub fn preview(&self) -> &AnimationCursor {
        &self.preview
    }

    pub fn show_samples(&self) -> bool {
        self.show_samples
    }

    pub fn update(&mut self, delta_secs: f32, input: &impl InputSource, registry: &mut SplineRegistry) {
        self.preview
            .apply_held(input.key_held(KeyCode::KeyR), input.key_held(KeyCode::KeyF));
        self.preview.advance(delta_secs);

        if !input.shift_held() {
            self.camera.update(delta_secs, input, None);
            return;
        }

        let Some(spline) = registry.get_mut(self.source.slot) else {
            return;
        };

        let offset = Vec3::new(
            input.axis(KeyCode::KeyD, KeyCode::KeyA),
            input.axis(KeyCode::KeyW, KeyCode::KeyS),
            input.axis(KeyCode::KeyQ, KeyCode::KeyE),
        ) * self.translate_speed
            * delta_secs;
        if offset != Vec3::ZERO {
            spline.translate_control_point(offset);
        }

        let turn = self.rotate_speed * delta_secs;
        let d_yaw = input.axis(KeyCode::ArrowLeft, KeyCode::ArrowRight) * turn;
        let d_pitch = input.axis(KeyCode::ArrowUp, KeyCode::ArrowDown) * turn;
        if d_yaw != 0.0 || d_pitch != 0.0 {
            spline.rotate_control_point(d_yaw, d_pitch);
        }
    }

    pub fn on_input(
        &mut self,
        event: &InputEvent,
        input: &impl InputSource,
        registry: &mut SplineRegistry,
    ) {
        let InputEvent::KeyPressed(key) = *event else {
            self.camera.on_input(event, input);
            return;
        };

        match key {
            KeyCode::KeyG => {
                self.show_samples = !self.show_samples;
                return;
            }
            KeyCode::KeyP => {
                self.preview.toggle_pause();
                return;
            }
            _ => {}
        }

        let Some(spline) = registry.get_mut(self.source.slot) else {
            return;
        };
        let shift = input.shift_held();

        match key {
            KeyCode::Tab if shift => spline.previous_control_point(),
            KeyCode::Tab => spline.next_control_point(),
            KeyCode::Space if shift => {
                let t = spline.delete_control_point(self.preview.t);
                self.preview.set_t(t);
            }
            KeyCode::Space => {
                let t = spline.create_control_point(self.preview.t, None, None);
                self.preview.set_t(t);
            }
            KeyCode::Backspace | KeyCode::Delete => spline.delete_custom_orientation(),
            KeyCode::KeyC => spline.toggle_cyclic_or_clamped(),
            _ => {}
        }
    }

    pub fn spline_view<'a>(&self, registry: &'a SplineRegistry) -> Option<SplineView<'a>> {
        let spline = registry.get(self.source.slot)?;
        let t = self.preview.t;
        Some(SplineView {
            spline,
            selected: Some(spline.selected_index()),
            show_orientations: true,
            show_samples: self.show_samples,
            preview: Some(PreviewPoint {
                position: spline.point(t),
                tangent: spline.tangent(t),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HeldInputs;
    use crate::spline::SplinePreset;

    fn editor() -> (SplineEditorState, SplineRegistry) {
        let mut registry = SplineRegistry::new(1);
        let state = SplineEditorState::start(&ModeSettings::default(), &mut registry).unwrap();
        (state, registry)
    }

    fn press(state: &mut SplineEditorState, registry: &mut SplineRegistry, key: KeyCode, shift: bool) {
        let held = if shift {
            HeldInputs::new().with_key(KeyCode::ShiftLeft)
        } else {
            HeldInputs::new()
        };
        state.on_input(&InputEvent::KeyPressed(key), &held, registry);
    }

    #[test]
    fn test_start_populates_slot_from_preset() {
        let (_, registry) = editor();
        let spline = registry.get(0).unwrap();
        assert_eq!(spline.control_points(), SplinePreset::DemoRoom.control_points().as_slice());
    }

    #[test]
    fn test_start_keeps_existing_spline() {
        let mut registry = SplineRegistry::new(1);
        registry
            .insert(0, SplinePreset::LoopTrack.build().unwrap())
            .unwrap();
        SplineEditorState::start(&ModeSettings::default(), &mut registry).unwrap();
        assert!(registry.get(0).unwrap().is_cyclic());
    }

    #[test]
    fn test_tab_cycles_selection() {
        let (mut state, mut registry) = editor();
        press(&mut state, &mut registry, KeyCode::Tab, false);
        assert_eq!(registry.get(0).unwrap().selected_index(), 1);
        press(&mut state, &mut registry, KeyCode::Tab, true);
        press(&mut state, &mut registry, KeyCode::Tab, true);
        let count = registry.get(0).unwrap().control_points().len();
        assert_eq!(registry.get(0).unwrap().selected_index(), count - 1);
    }

    #[test]
    fn test_space_creates_and_shift_space_deletes() {
        let (mut state, mut registry) = editor();
        let before = registry.get(0).unwrap().control_points().len();

        press(&mut state, &mut registry, KeyCode::Space, false);
        let spline = registry.get(0).unwrap();
        assert_eq!(spline.control_points().len(), before + 1);
        assert_eq!(spline.selected_index(), 1);
        assert!((state.preview().t - spline.knot_parameter(1)).abs() < 1e-6);

        press(&mut state, &mut registry, KeyCode::Space, true);
        assert_eq!(registry.get(0).unwrap().control_points().len(), before);
    }

    #[test]
    fn test_shift_movement_edits_point_not_camera() {
        let (mut state, mut registry) = editor();
        let camera_before = state.camera().rig().position;
        let point_before = registry.get(0).unwrap().control_points()[0];

        let held = HeldInputs::new()
            .with_key(KeyCode::ShiftLeft)
            .with_key(KeyCode::KeyW);
        state.update(1.0, &held, &mut registry);

        let point_after = registry.get(0).unwrap().control_points()[0];
        assert!((point_after - point_before - Vec3::new(0.0, 3.0, 0.0)).length() < 1e-5);
        assert_eq!(state.camera().rig().position, camera_before);
    }

    #[test]
    fn test_plain_movement_moves_camera_only() {
        let (mut state, mut registry) = editor();
        let camera_before = state.camera().rig().position;
        let points_before = registry.get(0).unwrap().control_points().to_vec();

        let held = HeldInputs::new().with_key(KeyCode::KeyW);
        state.update(1.0, &held, &mut registry);

        assert_ne!(state.camera().rig().position, camera_before);
        assert_eq!(registry.get(0).unwrap().control_points(), points_before.as_slice());
    }

    #[test]
    fn test_shift_arrows_set_orientation_and_backspace_clears() {
        let (mut state, mut registry) = editor();
        let held = HeldInputs::new()
            .with_key(KeyCode::ShiftLeft)
            .with_key(KeyCode::ArrowLeft);
        state.update(0.5, &held, &mut registry);
        assert!(registry.get(0).unwrap().orientations()[0].is_some());

        press(&mut state, &mut registry, KeyCode::Backspace, false);
        assert!(registry.get(0).unwrap().orientations()[0].is_none());
    }

    #[test]
    fn test_toggles() {
        let (mut state, mut registry) = editor();
        let cyclic = registry.get(0).unwrap().is_cyclic();
        press(&mut state, &mut registry, KeyCode::KeyC, false);
        assert_ne!(registry.get(0).unwrap().is_cyclic(), cyclic);

        press(&mut state, &mut registry, KeyCode::KeyG, false);
        assert!(state.show_samples());

        press(&mut state, &mut registry, KeyCode::KeyP, false);
        assert!(state.preview().paused);
    }

    #[test]
    fn test_preview_advances_and_is_rendered() {
        let (mut state, mut registry) = editor();
        state.update(1.0, &HeldInputs::new(), &mut registry);
        assert!(state.preview().t > 0.0);

        let view = state.spline_view(&registry).unwrap();
        let preview = view.preview.unwrap();
        assert!((preview.position - view.spline.point(state.preview().t)).length() < 1e-5);
        assert_eq!(view.selected, Some(0));
    }
}
