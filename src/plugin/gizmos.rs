//! Spline overlay drawn with Bevy gizmos.

use bevy::prelude::*;

use crate::spline::SplineRegistry;
use crate::state::{ModeController, SplineView};

use super::{GizmoVisuals, SplineCamSettings};

/// System to draw whatever spline overlay the active state asks for.
pub fn render_spline_overlay(
    mut gizmos: Gizmos,
    settings: Res<SplineCamSettings>,
    controller: Res<ModeController>,
    registry: Res<SplineRegistry>,
) {
    let visuals = &settings.visuals;
    if !visuals.enabled {
        return;
    }

    let Some(view) = controller.render(&registry).and_then(|frame| frame.spline) else {
        return;
    };

    draw_curve(&mut gizmos, &view, visuals);
    draw_control_points(&mut gizmos, &view, visuals);

    if let Some(preview) = view.preview {
        gizmos.sphere(
            Isometry3d::from_translation(preview.position),
            visuals.point_radius * 0.75,
            visuals.preview_color,
        );
        gizmos.arrow(
            preview.position,
            preview.position + preview.tangent * visuals.arrow_length,
            visuals.preview_color,
        );
    }
}

fn draw_curve(gizmos: &mut Gizmos, view: &SplineView, visuals: &GizmoVisuals) {
    gizmos.linestrip(view.spline.polyline(), visuals.curve_color);

    if view.show_samples {
        for &point in view.spline.sections().iter().flatten() {
            gizmos.sphere(
                Isometry3d::from_translation(point),
                visuals.sample_radius,
                visuals.sample_color,
            );
        }
    }
}

fn draw_control_points(gizmos: &mut Gizmos, view: &SplineView, visuals: &GizmoVisuals) {
    let spline = view.spline;
    for (index, &point) in spline.control_points().iter().enumerate() {
        let color = if view.selected == Some(index) {
            visuals.selected_point_color
        } else {
            visuals.point_color
        };
        gizmos.sphere(Isometry3d::from_translation(point), visuals.point_radius, color);

        if !view.show_orientations {
            continue;
        }
        if let Some(Some(direction)) = spline.orientations().get(index) {
            gizmos.arrow(
                point,
                point + *direction * visuals.arrow_length,
                visuals.orientation_color,
            );
        }
    }
}
