//! Camera states and the controller that switches between them.
//!
//! Exactly one [`SplineCamState`] is live at a time. Each state owns one
//! camera and, where it edits or rides a curve, refers to a slot in the
//! shared [`SplineRegistry`] so edits made in the editor are seen by the
//! follow camera.

mod controller;
mod editor;
mod follow;
mod free_cam;

pub use controller::*;
pub use editor::SplineEditorState;
pub use follow::FollowSplineState;
pub use free_cam::FreeCamState;

use bevy::prelude::*;

use crate::camera::{CameraKind, CameraRig, PerspectiveParams};
use crate::error::Result;
use crate::input::{InputEvent, InputSource};
use crate::playback::DEFAULT_PLAYBACK_SPEED;
use crate::spline::{Spline, SplinePreset, SplineRegistry};

/// The selectable camera modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    /// Fly around freely.
    FreeCam,
    /// Edit the shared spline.
    SplineEditor,
    /// Ride the shared spline.
    FollowSpline,
}

impl StateKind {
    /// All modes in key order.
    pub const ALL: [StateKind; 3] = [Self::FreeCam, Self::SplineEditor, Self::FollowSpline];

    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FreeCam => "Free Cam",
            Self::SplineEditor => "Spline Editor",
            Self::FollowSpline => "Follow Spline",
        }
    }

    /// Mode selected by a number key, if any.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(Self::FreeCam),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some(Self::SplineEditor),
            KeyCode::Digit3 | KeyCode::Numpad3 => Some(Self::FollowSpline),
            _ => None,
        }
    }
}

/// Registry slot a state uses and the preset that fills it when empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplineSource {
    /// Registry slot.
    pub slot: usize,
    /// Default layout for an empty slot.
    pub preset: SplinePreset,
}

impl SplineSource {
    pub fn new(slot: usize, preset: SplinePreset) -> Self {
        Self { slot, preset }
    }

    /// Fetch the slot's spline, populating it from the preset if needed.
    pub fn acquire<'a>(&self, registry: &'a mut SplineRegistry) -> Result<&'a mut Spline> {
        let preset = self.preset;
        registry.get_or_insert_with(self.slot, || preset.build())
    }
}

/// Tuning shared by the states when they start.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSettings {
    /// Projection for newly started cameras.
    pub projection: PerspectiveParams,
    /// Where manually driven cameras start.
    pub start_position: Vec3,
    /// What manually driven cameras look at initially.
    pub start_focus: Vec3,
    /// Spline edited by the editor state.
    pub editor_spline: SplineSource,
    /// Spline ridden by the follow state.
    pub follow_spline: SplineSource,
    /// Curve parameter units per second for previews and the follow camera.
    pub playback_speed: f32,
    /// Eye height above the curve for the follow camera.
    pub eye_offset: f32,
    /// Control point translation speed in units per second.
    pub edit_translate_speed: f32,
    /// Orientation override turn rate in radians per second.
    pub edit_rotate_speed: f32,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            projection: PerspectiveParams::default(),
            start_position: Vec3::new(0.0, 1.0, -15.0),
            start_focus: Vec3::ZERO,
            editor_spline: SplineSource::default(),
            follow_spline: SplineSource::default(),
            playback_speed: DEFAULT_PLAYBACK_SPEED,
            eye_offset: 0.0,
            edit_translate_speed: 3.0,
            edit_rotate_speed: 1.5,
        }
    }
}

impl ModeSettings {
    /// Use the same slot and preset for the editor and the follow camera.
    pub fn with_shared_spline(mut self, source: SplineSource) -> Self {
        self.editor_spline = source;
        self.follow_spline = source;
        self
    }

    /// Rig for a manually driven camera at the configured start.
    pub fn start_rig(&self) -> CameraRig {
        CameraRig::new(self.start_position, self.start_focus, self.projection)
    }
}

/// The live state of the mode controller.
#[derive(Debug, Clone)]
pub enum SplineCamState {
    FreeCam(FreeCamState),
    SplineEditor(SplineEditorState),
    FollowSpline(FollowSplineState),
}

impl SplineCamState {
    /// Construct and start a state of the given kind.
    pub fn start(
        kind: StateKind,
        settings: &ModeSettings,
        registry: &mut SplineRegistry,
    ) -> Result<Self> {
        let state = match kind {
            StateKind::FreeCam => Self::FreeCam(FreeCamState::start(settings)),
            StateKind::SplineEditor => {
                Self::SplineEditor(SplineEditorState::start(settings, registry)?)
            }
            StateKind::FollowSpline => {
                Self::FollowSpline(FollowSplineState::start(settings, registry)?)
            }
        };
        Ok(state)
    }

    pub fn kind(&self) -> StateKind {
        match self {
            Self::FreeCam(_) => StateKind::FreeCam,
            Self::SplineEditor(_) => StateKind::SplineEditor,
            Self::FollowSpline(_) => StateKind::FollowSpline,
        }
    }

    /// Called once before the state is replaced.
    pub fn stop(&mut self) {
        debug!("Stopping {} state", self.kind().name());
    }

    pub fn update(&mut self, delta_secs: f32, input: &impl InputSource, registry: &mut SplineRegistry) {
        match self {
            Self::FreeCam(state) => state.update(delta_secs, input),
            Self::SplineEditor(state) => state.update(delta_secs, input, registry),
            Self::FollowSpline(state) => state.update(delta_secs, input, registry),
        }
    }

    pub fn on_input(
        &mut self,
        event: &InputEvent,
        input: &impl InputSource,
        registry: &mut SplineRegistry,
    ) {
        match self {
            Self::FreeCam(state) => state.on_input(event, input),
            Self::SplineEditor(state) => state.on_input(event, input, registry),
            Self::FollowSpline(state) => state.on_input(event),
        }
    }

    pub fn camera(&self) -> &CameraKind {
        match self {
            Self::FreeCam(state) => state.camera(),
            Self::SplineEditor(state) => state.camera(),
            Self::FollowSpline(state) => state.camera(),
        }
    }

    pub fn camera_mut(&mut self) -> &mut CameraKind {
        match self {
            Self::FreeCam(state) => state.camera_mut(),
            Self::SplineEditor(state) => state.camera_mut(),
            Self::FollowSpline(state) => state.camera_mut(),
        }
    }

    /// What the renderer should draw for the spline this frame, if anything.
    pub fn spline_view<'a>(&self, registry: &'a SplineRegistry) -> Option<SplineView<'a>> {
        match self {
            Self::FreeCam(_) | Self::FollowSpline(_) => None,
            Self::SplineEditor(state) => state.spline_view(registry),
        }
    }
}
