//! Input seen by the camera states.
//!
//! States receive discrete [`InputEvent`]s in occurrence order and can ask
//! an [`InputSource`] whether a key or button is currently held. Key and
//! button identifiers are Bevy's [`KeyCode`] and [`MouseButton`].

use std::collections::HashSet;

use bevy::prelude::*;

/// A discrete input occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(KeyCode),
    KeyReleased(KeyCode),
    MouseButtonPressed {
        button: MouseButton,
        /// Cursor position in window pixels.
        position: Vec2,
    },
    MouseButtonReleased {
        button: MouseButton,
        /// Cursor position in window pixels.
        position: Vec2,
    },
    /// The cursor moved to a new absolute window position.
    MouseMoved(Vec2),
    /// Scroll wheel delta (positive y scrolls away from the user).
    MouseScrolled(Vec2),
}

/// Query for what is held down this frame.
pub trait InputSource {
    fn key_held(&self, key: KeyCode) -> bool;

    fn button_held(&self, button: MouseButton) -> bool;

    /// Either shift key.
    fn shift_held(&self) -> bool {
        self.key_held(KeyCode::ShiftLeft) || self.key_held(KeyCode::ShiftRight)
    }

    /// `+1` when `positive` is held, `-1` for `negative`, `0` for both or neither.
    fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        f32::from(i8::from(self.key_held(positive)) - i8::from(self.key_held(negative)))
    }
}

/// Held keys and buttons, maintained from events or set directly.
#[derive(Debug, Clone, Default)]
pub struct HeldInputs {
    keys: HashSet<KeyCode>,
    buttons: HashSet<MouseButton>,
}

impl HeldInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper that marks a key as held.
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys.insert(key);
        self
    }

    /// Builder-style helper that marks a mouse button as held.
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.buttons.insert(button);
        self
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.buttons.insert(button);
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.buttons.remove(&button);
    }

    /// Update held state from an event.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPressed(key) => self.press_key(key),
            InputEvent::KeyReleased(key) => self.release_key(key),
            InputEvent::MouseButtonPressed { button, .. } => self.press_button(button),
            InputEvent::MouseButtonReleased { button, .. } => self.release_button(button),
            InputEvent::MouseMoved(_) | InputEvent::MouseScrolled(_) => {}
        }
    }
}

impl InputSource for HeldInputs {
    fn key_held(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    fn button_held(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }
}

/// Held state read straight from Bevy's input resources.
pub struct BevyInput<'a> {
    pub keyboard: &'a ButtonInput<KeyCode>,
    pub mouse: &'a ButtonInput<MouseButton>,
}

impl InputSource for BevyInput<'_> {
    fn key_held(&self, key: KeyCode) -> bool {
        self.keyboard.pressed(key)
    }

    fn button_held(&self, button: MouseButton) -> bool {
        self.mouse.pressed(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_inputs_follow_events() {
        let mut held = HeldInputs::new();
        held.apply(&InputEvent::KeyPressed(KeyCode::KeyW));
        held.apply(&InputEvent::MouseButtonPressed {
            button: MouseButton::Left,
            position: Vec2::ZERO,
        });
        assert!(held.key_held(KeyCode::KeyW));
        assert!(held.button_held(MouseButton::Left));

        held.apply(&InputEvent::KeyReleased(KeyCode::KeyW));
        assert!(!held.key_held(KeyCode::KeyW));
    }

    #[test]
    fn test_axis() {
        let held = HeldInputs::new().with_key(KeyCode::KeyD);
        assert_eq!(held.axis(KeyCode::KeyD, KeyCode::KeyA), 1.0);
        assert_eq!(held.axis(KeyCode::KeyA, KeyCode::KeyD), -1.0);

        let both = held.with_key(KeyCode::KeyA);
        assert_eq!(both.axis(KeyCode::KeyD, KeyCode::KeyA), 0.0);
    }
}
