//! Adaptive midpoint subdivision of a single spline section.
//!
//! A cubic section has at most one inflection point, so a midpoint whose
//! tangent lines up with both endpoint tangents and which sits close to the
//! chord marks a span that can be drawn as a single straight segment.

use bevy::prelude::*;

use super::types::{angle_between_or_zero, distance_to_chord, SamplingThresholds};

/// A point on a section together with its (unnormalised) tangent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSample {
    /// Position on the curve.
    pub position: Vec3,
    /// Derivative with respect to the local parameter.
    pub tangent: Vec3,
}

/// Subdivide one section into `[start, ...interior, end]`.
///
/// `evaluate` maps a local parameter in `[0, 1]` to a sample on the section.
pub fn subdivide_section<F>(evaluate: F, thresholds: &SamplingThresholds) -> Vec<Vec3>
where
    F: Fn(f32) -> SectionSample,
{
    let start = evaluate(0.0);
    let end = evaluate(1.0);

    let mut points = vec![start.position];
    subdivide(&evaluate, thresholds, (0.0, start), (1.0, end), &mut points);
    points.push(end.position);
    points
}

/// Push the interior points of `[a, b]` onto `out` in curve order.
fn subdivide<F>(
    evaluate: &F,
    thresholds: &SamplingThresholds,
    (a, start): (f32, SectionSample),
    (b, end): (f32, SectionSample),
    out: &mut Vec<Vec3>,
) where
    F: Fn(f32) -> SectionSample,
{
    if b - a < thresholds.maximum_sampling_detail {
        return;
    }

    let m = (a + b) * 0.5;
    let mid = evaluate(m);

    let aligned = angle_between_or_zero(mid.tangent, start.tangent) < thresholds.angle
        && angle_between_or_zero(mid.tangent, end.tangent) < thresholds.angle;
    let close = distance_to_chord(mid.position, start.position, end.position) < thresholds.distance;
    if aligned && close {
        return;
    }

    subdivide(evaluate, thresholds, (a, start), (m, mid), out);
    out.push(mid.position);
    subdivide(evaluate, thresholds, (m, mid), (b, end), out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(t: f32) -> SectionSample {
        SectionSample {
            position: Vec3::new(t * 10.0, 0.0, 0.0),
            tangent: Vec3::X * 10.0,
        }
    }

    fn arc(t: f32) -> SectionSample {
        let angle = t * std::f32::consts::FRAC_PI_2;
        SectionSample {
            position: Vec3::new(angle.cos(), angle.sin(), 0.0) * 5.0,
            tangent: Vec3::new(-angle.sin(), angle.cos(), 0.0) * 5.0,
        }
    }

    #[test]
    fn test_straight_section_has_no_interior_points() {
        let points = subdivide_section(line, &SamplingThresholds::default());
        assert_eq!(points.len(), 2);
        assert!((points[0] - Vec3::ZERO).length() < 1e-6);
        assert!((points[1] - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_curved_section_is_refined_in_order() {
        let points = subdivide_section(arc, &SamplingThresholds::default());
        assert!(points.len() > 8);

        // Points progress monotonically around the arc.
        let angles: Vec<f32> = points.iter().map(|p| p.y.atan2(p.x)).collect();
        for pair in angles.windows(2) {
            assert!(pair[1] >= pair[0] - 1e-4);
        }
    }

    #[test]
    fn test_tighter_thresholds_add_points() {
        let loose = subdivide_section(arc, &SamplingThresholds::new(0.5, 2.0));
        let tight = subdivide_section(arc, &SamplingThresholds::new(0.01, 0.01));
        assert!(tight.len() > loose.len());
    }

    #[test]
    fn test_recursion_floor_bounds_output() {
        let thresholds = SamplingThresholds::new(0.0, 0.0);
        let points = subdivide_section(arc, &thresholds);
        // Depth is bounded by the span floor: at most 2^10 spans.
        assert!(points.len() <= 1025);
    }
}
