use bevy::prelude::*;

use crate::camera::{CameraKind, FollowSplineCamera};
use crate::error::Result;
use crate::input::{InputEvent, InputSource};
use crate::playback::AnimationCursor;
use crate::spline::SplineRegistry;

use super::{ModeSettings, SplineSource};

/// Ride along the shared spline.
///
/// P pauses, R/F (held) rewind and fast-forward, Home jumps back to the start.
#[derive(Debug, Clone)]
pub struct FollowSplineState {
    camera: CameraKind,
    source: SplineSource,
}

impl FollowSplineState {
    pub fn start(settings: &ModeSettings, registry: &mut SplineRegistry) -> Result<Self> {
        let spline = settings.follow_spline.acquire(registry)?;
        let camera = FollowSplineCamera::new(
            spline,
            settings.projection,
            AnimationCursor::new(settings.playback_speed),
        )
        .with_eye_offset(settings.eye_offset);

        Ok(Self {
            camera: CameraKind::FollowSpline(camera),
            source: settings.follow_spline,
        })
    }

    pub fn camera(&self) -> &CameraKind {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraKind {
        &mut self.camera
    }

    pub fn cursor(&self) -> Option<&AnimationCursor> {
        self.camera.cursor()
    }

    pub fn update(&mut self, delta_secs: f32, input: &impl InputSource, registry: &SplineRegistry) {
        if let Some(cursor) = self.camera.cursor_mut() {
            cursor.apply_held(input.key_held(KeyCode::KeyR), input.key_held(KeyCode::KeyF));
        }
        self.camera
            .update(delta_secs, input, registry.get(self.source.slot));
    }

    pub fn on_input(&mut self, event: &InputEvent) {
        let Some(cursor) = self.camera.cursor_mut() else {
            return;
        };
        match event {
            InputEvent::KeyPressed(KeyCode::KeyP) => {
                cursor.toggle_pause();
                info!("Follow camera {}", cursor.state().name());
            }
            InputEvent::KeyPressed(KeyCode::Home) => cursor.reset(),
            _ => {}
        }
    }
}
