/// Default cursor speed in curve parameter units per second.
pub const DEFAULT_PLAYBACK_SPEED: f32 = 0.02;

/// What a cursor is currently doing, derived from its flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Moving forward at normal speed.
    #[default]
    Playing,
    /// Not moving.
    Paused,
    /// Moving backward.
    Rewinding,
    /// Moving forward at double speed (or normal speed while paused).
    FastForwarding,
}

impl PlaybackState {
    /// Get the display name for this state.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Rewinding => "Rewinding",
            Self::FastForwarding => "Fast-forwarding",
        }
    }
}

/// A normalized position along a curve that advances over time.
///
/// `t` always stays in `[0, 1)` while playing; it wraps at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationCursor {
    /// Current position on the curve.
    pub t: f32,
    /// Parameter units advanced per second at normal speed.
    pub speed: f32,
    /// Whether normal forward playback is stopped.
    pub paused: bool,
    /// Play backward. Overrides pause and fast-forward.
    pub rewind: bool,
    /// Add one extra step of forward speed.
    pub fast_forward: bool,
}

impl Default for AnimationCursor {
    fn default() -> Self {
        Self {
            t: 0.0,
            speed: DEFAULT_PLAYBACK_SPEED,
            paused: false,
            rewind: false,
            fast_forward: false,
        }
    }
}

impl AnimationCursor {
    /// Create a cursor with the given speed.
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }

    /// Set the starting position (clamped to `[0, 1]`).
    pub fn with_start_t(mut self, t: f32) -> Self {
        self.set_t(t);
        self
    }

    /// Jump to a position (clamped to `[0, 1]`).
    pub fn set_t(&mut self, t: f32) {
        self.t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Reset to the start of the curve, keeping the pause flag.
    pub fn reset(&mut self) {
        self.t = 0.0;
    }

    /// Refresh the direction flags from what is held this frame.
    pub fn apply_held(&mut self, rewind: bool, fast_forward: bool) {
        self.rewind = rewind;
        self.fast_forward = fast_forward;
    }

    /// Signed speed multiplier: -1 rewinding, otherwise 0, 1 or 2.
    pub fn step_multiplier(&self) -> f32 {
        if self.rewind {
            -1.0
        } else {
            f32::from(u8::from(!self.paused) + u8::from(self.fast_forward))
        }
    }

    pub fn state(&self) -> PlaybackState {
        if self.rewind {
            PlaybackState::Rewinding
        } else if self.fast_forward {
            PlaybackState::FastForwarding
        } else if self.paused {
            PlaybackState::Paused
        } else {
            PlaybackState::Playing
        }
    }

    /// Advance by `delta_secs` and wrap into `[0, 1)`.
    pub fn advance(&mut self, delta_secs: f32) {
        let step = self.speed * self.step_multiplier() * delta_secs.max(0.0);
        if step != 0.0 {
            self.t = wrap_unit(self.t + step);
        }
    }
}

/// Wrap a parameter into `[0, 1)`, counting negative values back from the end.
pub fn wrap_unit(t: f32) -> f32 {
    let wrapped = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_multiplier() {
        let mut cursor = AnimationCursor::default();
        assert_eq!(cursor.step_multiplier(), 1.0);

        cursor.fast_forward = true;
        assert_eq!(cursor.step_multiplier(), 2.0);

        cursor.paused = true;
        assert_eq!(cursor.step_multiplier(), 1.0);

        cursor.fast_forward = false;
        assert_eq!(cursor.step_multiplier(), 0.0);
        assert_eq!(cursor.state(), PlaybackState::Paused);

        cursor.rewind = true;
        assert_eq!(cursor.step_multiplier(), -1.0);
        assert_eq!(cursor.state(), PlaybackState::Rewinding);
    }

    #[test]
    fn test_advance_wraps_forward() {
        let mut cursor = AnimationCursor::new(0.5).with_start_t(0.9);
        cursor.advance(0.4);
        assert!((cursor.t - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_advance_wraps_backward() {
        let mut cursor = AnimationCursor::new(0.5).with_start_t(0.1);
        cursor.apply_held(true, false);
        cursor.advance(0.4);
        assert!((cursor.t - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_paused_cursor_holds_position() {
        let mut cursor = AnimationCursor::new(0.5).with_start_t(0.3);
        cursor.toggle_pause();
        cursor.advance(10.0);
        assert_eq!(cursor.t, 0.3);
    }

    #[test]
    fn test_wrap_unit_stays_below_one() {
        assert_eq!(wrap_unit(1.0), 0.0);
        assert!(wrap_unit(-1e-9) < 1.0);
        assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-6);
    }
}
