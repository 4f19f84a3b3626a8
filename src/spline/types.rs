use bevy::prelude::*;

/// Default angle (radians) below which a midpoint tangent counts as aligned.
pub const DEFAULT_ANGLE_THRESHOLD: f32 = 0.075;

/// Default chord distance below which a sub-section counts as straight.
pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 1.0;

/// Smallest local parameter span the subdivision will split.
///
/// This only stops runaway recursion; it is not a quality setting.
pub const MAXIMUM_SAMPLING_DETAIL: f32 = 0.001;

/// Minimum number of control points a spline can hold.
pub const MIN_CONTROL_POINTS: usize = 2;

/// Error thresholds for the adaptive polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingThresholds {
    /// Maximum angle between the midpoint tangent and either endpoint tangent.
    pub angle: f32,
    /// Maximum distance between the midpoint and the endpoint chord.
    pub distance: f32,
    /// Recursion floor on the local parameter span.
    pub maximum_sampling_detail: f32,
}

impl Default for SamplingThresholds {
    fn default() -> Self {
        Self {
            angle: DEFAULT_ANGLE_THRESHOLD,
            distance: DEFAULT_DISTANCE_THRESHOLD,
            maximum_sampling_detail: MAXIMUM_SAMPLING_DETAIL,
        }
    }
}

impl SamplingThresholds {
    /// Thresholds with the given angle and distance and the default floor.
    pub fn new(angle: f32, distance: f32) -> Self {
        Self {
            angle,
            distance,
            ..default()
        }
    }
}

/// Uniform cubic B-spline point for local parameter `t` in `[0, 1]`.
pub fn bspline(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    p0 * ((-t3 + 3.0 * t2 - 3.0 * t + 1.0) / 6.0)
        + p1 * ((3.0 * t3 - 6.0 * t2 + 4.0) / 6.0)
        + p2 * ((-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0)
        + p3 * (t3 / 6.0)
}

/// Derivative of [`bspline`] with respect to the local parameter.
pub fn bspline_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;

    p0 * ((-3.0 * t2 + 6.0 * t - 3.0) / 6.0)
        + p1 * ((9.0 * t2 - 12.0 * t) / 6.0)
        + p2 * ((-9.0 * t2 + 6.0 * t + 3.0) / 6.0)
        + p3 * ((3.0 * t2) / 6.0)
}

/// Cosine ease used to blend knot orientations across a section.
pub fn cosine_ease(t: f32) -> f32 {
    (1.0 - (t * std::f32::consts::PI).cos()) / 2.0
}

/// Angle between two directions, treating a zero-length input as aligned.
pub fn angle_between_or_zero(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() < f32::EPSILON || b.length_squared() < f32::EPSILON {
        return 0.0;
    }
    let cos = a.normalize().dot(b.normalize()).clamp(-1.0, 1.0);
    cos.acos()
}

/// Distance from `point` to the segment `a`-`b`.
pub fn distance_to_chord(point: Vec3, a: Vec3, b: Vec3) -> f32 {
    let chord = b - a;
    let len_sq = chord.length_squared();
    if len_sq < f32::EPSILON {
        return point.distance(a);
    }
    let s = ((point - a).dot(chord) / len_sq).clamp(0.0, 1.0);
    point.distance(a + chord * s)
}
