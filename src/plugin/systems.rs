use bevy::{
    input::{
        keyboard::KeyboardInput,
        mouse::{MouseButtonInput, MouseScrollUnit, MouseWheel},
        ButtonState,
    },
    prelude::*,
    window::{CursorMoved, PrimaryWindow},
};

use crate::input::{BevyInput, InputEvent};
use crate::spline::SplineRegistry;
use crate::state::ModeController;

/// Marker for the `Camera3d` driven by the active camera state.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SplineCamView;

/// Keep the projection aspect in step with the primary window.
pub fn track_window_aspect(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut controller: ResMut<ModeController>,
) {
    for window in &windows {
        let height = window.height();
        if height > 0.0 {
            controller.set_aspect(window.width() / height);
        }
    }
}

/// Translate this frame's Bevy input messages and hand them to the controller.
#[allow(clippy::too_many_arguments)]
pub fn forward_input(
    mut keys: MessageReader<KeyboardInput>,
    mut buttons: MessageReader<MouseButtonInput>,
    mut cursor: MessageReader<CursorMoved>,
    mut wheel: MessageReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut last_cursor: Local<Vec2>,
    mut controller: ResMut<ModeController>,
    mut registry: ResMut<SplineRegistry>,
) {
    let mut events = Vec::new();

    for event in keys.read().filter(|event| !event.repeat) {
        events.push(key_event(event.key_code, event.state));
    }

    // Cursor motion comes after buttons so a press starts the look drag.
    for event in buttons.read() {
        events.push(button_event(event.button, event.state, *last_cursor));
    }

    for event in cursor.read() {
        *last_cursor = event.position;
        events.push(InputEvent::MouseMoved(event.position));
    }

    for event in wheel.read() {
        events.push(InputEvent::MouseScrolled(scroll_lines(event.unit, Vec2::new(event.x, event.y))));
    }

    let input = BevyInput {
        keyboard: &keyboard,
        mouse: &mouse,
    };
    for event in &events {
        if let Err(err) = controller.handle_input(event, &input, &mut registry) {
            warn!("Ignoring {event:?}: {err}");
        }
    }
}

pub fn update_controller(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut controller: ResMut<ModeController>,
    mut registry: ResMut<SplineRegistry>,
) {
    let input = BevyInput {
        keyboard: &keyboard,
        mouse: &mouse,
    };
    controller.update(time.delta_secs(), &input, &mut registry);
}

/// Copy the active camera's pose and lens onto tagged cameras.
pub fn sync_camera(
    controller: Res<ModeController>,
    registry: Res<SplineRegistry>,
    mut cameras: Query<(&mut Transform, &mut Projection), With<SplineCamView>>,
) {
    let Some(frame) = controller.render(&registry) else {
        return;
    };
    let lens = frame.rig.projection;

    for (mut transform, mut projection) in &mut cameras {
        *transform = frame.rig.transform();
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = lens.fov_degrees.to_radians();
            perspective.near = lens.near;
            perspective.far = lens.far;
        }
    }
}

fn key_event(key: KeyCode, state: ButtonState) -> InputEvent {
    match state {
        ButtonState::Pressed => InputEvent::KeyPressed(key),
        ButtonState::Released => InputEvent::KeyReleased(key),
    }
}

fn button_event(button: MouseButton, state: ButtonState, position: Vec2) -> InputEvent {
    match state {
        ButtonState::Pressed => InputEvent::MouseButtonPressed { button, position },
        ButtonState::Released => InputEvent::MouseButtonReleased { button, position },
    }
}

/// Normalize scroll to lines: web reports pixels, native reports lines.
fn scroll_lines(unit: MouseScrollUnit, delta: Vec2) -> Vec2 {
    match unit {
        MouseScrollUnit::Line => delta,
        MouseScrollUnit::Pixel => delta / 120.0,
    }
}
