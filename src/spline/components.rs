use bevy::prelude::*;

use crate::error::{Result, SplineCamError};
use crate::geometry::CoordinateFrame;

use super::subdivision::{subdivide_section, SectionSample};
use super::types::{
    bspline, bspline_derivative, cosine_ease, SamplingThresholds, MIN_CONTROL_POINTS,
};

/// Largest |dot(direction, up)| an orientation override may reach while pitching.
const MAX_PITCH_DOT: f32 = 0.999;

/// A uniform cubic B-spline through an ordered set of control points.
///
/// Each control point may carry an orientation override that pins the
/// tangent direction at that knot. The spline keeps an adaptively
/// subdivided polyline per section, rebuilt on every structural edit.
#[derive(Debug, Clone, Default)]
pub struct Spline {
    control_points: Vec<Vec3>,
    orientations: Vec<Option<Vec3>>,
    selected: usize,
    cyclic: bool,
    thresholds: SamplingThresholds,
    sections: Vec<Vec<Vec3>>,
}

impl Spline {
    /// Create a clamped spline with default thresholds.
    pub fn new(control_points: Vec<Vec3>) -> Result<Self> {
        let mut spline = Self::default();
        spline.initialize(
            control_points,
            Vec::new(),
            false,
            SamplingThresholds::default(),
        )?;
        Ok(spline)
    }

    /// Create a cyclic spline with default thresholds.
    pub fn cyclic(control_points: Vec<Vec3>) -> Result<Self> {
        let mut spline = Self::default();
        spline.initialize(
            control_points,
            Vec::new(),
            true,
            SamplingThresholds::default(),
        )?;
        Ok(spline)
    }

    /// Replace the orientation overrides. Ignored if the length does not match.
    pub fn with_orientations(mut self, orientations: Vec<Option<Vec3>>) -> Self {
        if orientations.len() == self.control_points.len() {
            self.orientations = normalize_orientations(orientations);
            self.calculate_spline_points();
        }
        self
    }

    /// Replace the subdivision thresholds.
    pub fn with_thresholds(mut self, thresholds: SamplingThresholds) -> Self {
        self.thresholds = thresholds;
        self.calculate_spline_points();
        self
    }

    /// Replace all control points and rebuild the polyline.
    ///
    /// Orientation overrides are reset to unset when their count does not
    /// match the control points. The selection returns to index 0.
    pub fn initialize(
        &mut self,
        control_points: Vec<Vec3>,
        orientations: Vec<Option<Vec3>>,
        cyclic: bool,
        thresholds: SamplingThresholds,
    ) -> Result<()> {
        if control_points.len() < MIN_CONTROL_POINTS {
            return Err(SplineCamError::NotEnoughControlPoints {
                found: control_points.len(),
                required: MIN_CONTROL_POINTS,
            });
        }

        self.orientations = if orientations.len() == control_points.len() {
            normalize_orientations(orientations)
        } else {
            vec![None; control_points.len()]
        };
        self.control_points = control_points;
        self.cyclic = cyclic;
        self.thresholds = thresholds;
        self.selected = 0;
        self.calculate_spline_points();

        debug!(
            "Initialized {} spline with {} control points",
            if cyclic { "cyclic" } else { "clamped" },
            self.control_points.len()
        );
        Ok(())
    }

    /// Whether `initialize` has populated this spline.
    pub fn is_initialized(&self) -> bool {
        !self.control_points.is_empty()
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    pub fn orientations(&self) -> &[Option<Vec3>] {
        &self.orientations
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Position of the selected control point.
    pub fn selected_control_point(&self) -> Option<Vec3> {
        self.control_points.get(self.selected).copied()
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn thresholds(&self) -> &SamplingThresholds {
        &self.thresholds
    }

    /// Number of curve sections: `N` when cyclic, `N - 1` when clamped.
    pub fn section_count(&self) -> usize {
        let n = self.control_points.len();
        if self.cyclic {
            n
        } else {
            n.saturating_sub(1)
        }
    }

    /// Resolve a possibly out-of-range control point index.
    ///
    /// Cyclic splines wrap modulo the point count, clamped splines clamp to
    /// the first and last point.
    pub fn resolve_index(&self, index: isize) -> usize {
        let n = self.control_points.len() as isize;
        if n == 0 {
            return 0;
        }
        if self.cyclic {
            index.rem_euclid(n) as usize
        } else {
            index.clamp(0, n - 1) as usize
        }
    }

    /// Control point position for a possibly out-of-range index.
    ///
    /// Past the ends of a clamped spline the neighbours are mirrored through
    /// the end point, so the curve starts and ends exactly on it.
    fn control_point_at(&self, index: isize) -> Vec3 {
        let n = self.control_points.len() as isize;
        if self.cyclic || (0..n).contains(&index) || n < 2 {
            return self.control_points[self.resolve_index(index)];
        }

        let points = &self.control_points;
        if index < 0 {
            let step = points[0] - points[1];
            points[0] + step * (-index) as f32
        } else {
            let last = points[(n - 1) as usize];
            let step = last - points[(n - 2) as usize];
            last + step * (index - (n - 1)) as f32
        }
    }

    fn section_control_points(&self, section: usize) -> [Vec3; 4] {
        let i = section as isize;
        [
            self.control_point_at(i - 1),
            self.control_point_at(i),
            self.control_point_at(i + 1),
            self.control_point_at(i + 2),
        ]
    }

    /// Map a global parameter to `(section, local parameter)`.
    pub fn locate(&self, t: f32) -> (usize, f32) {
        let sections = self.section_count();
        if sections == 0 {
            return (0, 0.0);
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * sections as f32;
        let section = (scaled.floor() as usize).min(sections - 1);
        (section, scaled - section as f32)
    }

    /// Point on the given section at local parameter `u`.
    pub fn section_point(&self, section: usize, u: f32) -> Vec3 {
        let [p0, p1, p2, p3] = self.section_control_points(section);
        bspline(p0, p1, p2, p3, u)
    }

    /// Analytic derivative on the given section at local parameter `u`.
    pub fn section_derivative(&self, section: usize, u: f32) -> Vec3 {
        let [p0, p1, p2, p3] = self.section_control_points(section);
        bspline_derivative(p0, p1, p2, p3, u)
    }

    /// Point on the curve for `t` in `[0, 1]` (clamped).
    pub fn point(&self, t: f32) -> Vec3 {
        if self.control_points.is_empty() {
            return Vec3::ZERO;
        }
        let (section, u) = self.locate(t);
        self.section_point(section, u)
    }

    /// Unit tangent for `t` in `[0, 1]` (clamped).
    ///
    /// Orientation overrides on the section's bounding knots replace the
    /// analytic direction at those knots and are eased in with
    /// [`cosine_ease`] across the section.
    pub fn tangent(&self, t: f32) -> Vec3 {
        if self.control_points.is_empty() {
            return Vec3::Z;
        }

        let (section, u) = self.locate(t);
        let i = section as isize;
        let chord = (self.control_point_at(i + 1) - self.control_point_at(i))
            .try_normalize()
            .unwrap_or(Vec3::Z);
        let analytic = self
            .section_derivative(section, u)
            .try_normalize()
            .unwrap_or(chord);

        let start = self.orientations[self.resolve_index(i)];
        let end = self.orientations[self.resolve_index(i + 1)];
        if start.is_none() && end.is_none() {
            return analytic;
        }

        let start = start.unwrap_or(analytic);
        let end = end.unwrap_or(analytic);
        start
            .lerp(end, cosine_ease(u))
            .try_normalize()
            .unwrap_or(analytic)
    }

    /// Parameter of the knot at the given control point index.
    pub fn knot_parameter(&self, index: usize) -> f32 {
        let sections = self.section_count();
        if sections == 0 {
            return 0.0;
        }
        (index as f32 / sections as f32).min(1.0)
    }

    pub fn next_control_point(&mut self) {
        if !self.control_points.is_empty() {
            self.selected = (self.selected + 1) % self.control_points.len();
        }
    }

    pub fn previous_control_point(&mut self) {
        let n = self.control_points.len();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
    }

    /// Select a control point; the index wraps modulo the point count.
    pub fn select_control_point(&mut self, index: usize) {
        if !self.control_points.is_empty() {
            self.selected = index % self.control_points.len();
        }
    }

    /// Move the selected control point by `offset`.
    pub fn translate_control_point(&mut self, offset: Vec3) {
        let Some(point) = self.control_points.get_mut(self.selected) else {
            return;
        };
        *point += offset;
        self.calculate_spline_points();
    }

    /// Turn the selected point's orientation override by yaw, then pitch.
    ///
    /// An unset override starts out facing +Z. Pitch steps that would pass
    /// over a pole, or move closer to it than the pitch limit, are dropped.
    /// Steps away from a pole are always applied.
    pub fn rotate_control_point(&mut self, d_yaw: f32, d_pitch: f32) {
        let Some(slot) = self.orientations.get_mut(self.selected) else {
            return;
        };

        let direction = slot.unwrap_or(Vec3::Z);
        let yawed = Quat::from_axis_angle(Vec3::Y, d_yaw) * direction;
        let axis = CoordinateFrame::from_forward(yawed).right;
        let pitched = (Quat::from_axis_angle(axis, d_pitch) * yawed).normalize();

        let before = yawed.dot(Vec3::Y).abs();
        let after = pitched.dot(Vec3::Y).abs();
        let crosses_pole = pitched.xz().dot(yawed.xz()) < 0.0;
        let rotated = if crosses_pole || (after > MAX_PITCH_DOT && after > before) {
            yawed
        } else {
            pitched
        };

        *slot = Some(rotated.try_normalize().unwrap_or(Vec3::Z));
        self.calculate_spline_points();
    }

    /// Set or clear the orientation override of a control point.
    pub fn set_custom_orientation(&mut self, index: usize, direction: Option<Vec3>) {
        let Some(slot) = self.orientations.get_mut(index) else {
            return;
        };
        *slot = direction.and_then(Vec3::try_normalize);
        self.calculate_spline_points();
    }

    /// Clear the selected point's orientation override.
    pub fn delete_custom_orientation(&mut self) {
        let selected = self.selected;
        self.set_custom_orientation(selected, None);
    }

    /// Insert a control point after the section containing `t`.
    ///
    /// Without an explicit position the new point is placed on the curve at
    /// `t`. The new point becomes the selection. Returns the parameter of the
    /// new point's knot so an animated cursor can follow it.
    pub fn create_control_point(
        &mut self,
        t: f32,
        position: Option<Vec3>,
        orientation: Option<Vec3>,
    ) -> f32 {
        if self.control_points.is_empty() {
            return t;
        }

        let (section, _) = self.locate(t);
        let position = position.unwrap_or_else(|| self.point(t));
        let index = section + 1;

        self.control_points.insert(index, position);
        self.orientations
            .insert(index, orientation.and_then(Vec3::try_normalize));
        self.selected = index;
        self.calculate_spline_points();

        debug!("Created control point {index} at {position}");
        self.knot_parameter(index)
    }

    /// Remove the selected control point.
    ///
    /// Does nothing and returns `t` when fewer than three points remain.
    /// Otherwise returns `t` remapped so that a cursor on the curve stays
    /// put: the two sections meeting at the removed point share the merged
    /// section proportionally.
    pub fn delete_control_point(&mut self, t: f32) -> f32 {
        let n = self.control_points.len();
        if n < MIN_CONTROL_POINTS + 1 {
            warn!("Refusing to delete control point: only {n} remain");
            return t;
        }

        let removed = self.selected;
        let remapped = self.remap_after_removal(removed, t);

        self.control_points.remove(removed);
        self.orientations.remove(removed);
        self.selected = removed.saturating_sub(1);
        self.calculate_spline_points();

        debug!("Deleted control point {removed}");
        remapped
    }

    /// Parameter `t` expressed against the spline without control point `k`.
    fn remap_after_removal(&self, k: usize, t: f32) -> f32 {
        let n = self.control_points.len();
        let new_sections = self.section_count() - 1;
        let (j, u) = self.locate(t);

        let scaled = if self.cyclic {
            // Sections k-1 and k (mod n) merge into the section that now
            // starts at the point before k.
            let before = (k + n - 1) % n;
            let merged = if k == 0 { n - 2 } else { k - 1 };
            if j == before {
                merged as f32 + u * 0.5
            } else if j == k {
                merged as f32 + (1.0 + u) * 0.5
            } else if j < k {
                j as f32 + u
            } else {
                (j - 1) as f32 + u
            }
        } else if k == 0 {
            if j == 0 {
                0.0
            } else {
                (j - 1) as f32 + u
            }
        } else if k == n - 1 {
            if j == k - 1 {
                new_sections as f32
            } else {
                j as f32 + u
            }
        } else if j + 1 == k {
            (k - 1) as f32 + u * 0.5
        } else if j == k {
            (k - 1) as f32 + (1.0 + u) * 0.5
        } else if j < k {
            j as f32 + u
        } else {
            (j - 1) as f32 + u
        };

        (scaled / new_sections as f32).clamp(0.0, 1.0)
    }

    /// Switch between cyclic and clamped topology.
    pub fn toggle_cyclic_or_clamped(&mut self) {
        self.cyclic = !self.cyclic;
        self.calculate_spline_points();
        debug!(
            "Spline is now {}",
            if self.cyclic { "cyclic" } else { "clamped" }
        );
    }

    /// Rebuild the cached polyline for every section.
    pub fn calculate_spline_points(&mut self) {
        let thresholds = self.thresholds;
        self.sections = (0..self.section_count())
            .map(|section| {
                subdivide_section(
                    |u| SectionSample {
                        position: self.section_point(section, u),
                        tangent: self.section_derivative(section, u),
                    },
                    &thresholds,
                )
            })
            .collect();
    }

    /// Cached polyline, one point list per section.
    pub fn sections(&self) -> &[Vec<Vec3>] {
        &self.sections
    }

    /// Cached polyline flattened into a single strip.
    ///
    /// Points shared by consecutive sections appear once.
    pub fn polyline(&self) -> Vec<Vec3> {
        let total = self.sections.iter().map(Vec::len).sum();
        let mut points = Vec::with_capacity(total);
        for section in &self.sections {
            let skip = usize::from(!points.is_empty());
            points.extend(section.iter().skip(skip));
        }
        points
    }
}

fn normalize_orientations(orientations: Vec<Option<Vec3>>) -> Vec<Option<Vec3>> {
    orientations
        .into_iter()
        .map(|o| o.and_then(Vec3::try_normalize))
        .collect()
}
