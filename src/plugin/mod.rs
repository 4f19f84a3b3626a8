//! Bevy glue: feeds input and time into the [`ModeController`] and mirrors
//! its camera onto a `Camera3d`.

#[cfg(feature = "gizmos")]
mod gizmos;
mod systems;

pub use systems::SplineCamView;

use bevy::prelude::*;

use crate::spline::SplineRegistry;
use crate::state::{ModeController, ModeSettings, StateKind};

/// Colors and sizes for the spline overlay.
#[derive(Debug, Clone)]
pub struct GizmoVisuals {
    /// Whether to draw the overlay at all.
    pub enabled: bool,
    /// Radius of control point spheres.
    pub point_radius: f32,
    /// Radius of debug sample spheres.
    pub sample_radius: f32,
    /// Length of orientation and tangent arrows.
    pub arrow_length: f32,
    /// Line width for the curve.
    pub line_width: f32,
    pub curve_color: Color,
    pub point_color: Color,
    pub selected_point_color: Color,
    pub orientation_color: Color,
    pub preview_color: Color,
    pub sample_color: Color,
}

impl Default for GizmoVisuals {
    fn default() -> Self {
        Self {
            enabled: true,
            point_radius: 0.15,
            sample_radius: 0.04,
            arrow_length: 1.0,
            line_width: 3.0,
            curve_color: Color::srgb(1.0, 0.8, 0.2),
            point_color: Color::srgb(0.3, 0.3, 0.8),
            selected_point_color: Color::srgb(1.0, 0.4, 0.4),
            orientation_color: Color::srgb(0.3, 0.9, 0.4),
            preview_color: Color::srgb(0.9, 0.9, 0.9),
            sample_color: Color::srgb(0.6, 0.6, 0.6),
        }
    }
}

/// Settings read once when [`SplineCamPlugin`] is added.
///
/// Insert this resource before adding the plugin to override the defaults.
#[derive(Resource, Debug, Clone)]
pub struct SplineCamSettings {
    /// Number of spline slots in the registry.
    pub registry_slots: usize,
    /// Per-state tuning.
    pub modes: ModeSettings,
    /// Mode selected at startup. `None` waits for a number key.
    pub initial_mode: Option<StateKind>,
    /// Overlay appearance.
    pub visuals: GizmoVisuals,
}

impl Default for SplineCamSettings {
    fn default() -> Self {
        Self {
            registry_slots: 1,
            modes: ModeSettings::default(),
            initial_mode: Some(StateKind::FreeCam),
            visuals: GizmoVisuals::default(),
        }
    }
}

impl SplineCamSettings {
    /// Select `mode` at startup.
    pub fn with_initial_mode(mut self, mode: Option<StateKind>) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Use `modes` for state tuning.
    pub fn with_modes(mut self, modes: ModeSettings) -> Self {
        self.modes = modes;
        self
    }
}

/// Build the registry and controller described by `settings`.
pub fn build_resources(settings: &SplineCamSettings) -> (SplineRegistry, ModeController) {
    let mut registry = SplineRegistry::new(settings.registry_slots);
    let mut controller = ModeController::new(settings.modes.clone());

    if let Some(mode) = settings.initial_mode {
        if let Err(err) = controller.select_mode(mode, &mut registry) {
            warn!("Could not start in {} mode: {err}", mode.name());
        }
    }

    (registry, controller)
}

/// System to sync overlay settings to gizmo config.
#[cfg(feature = "gizmos")]
fn sync_gizmo_config(
    settings: Res<SplineCamSettings>,
    mut config_store: ResMut<bevy::gizmos::config::GizmoConfigStore>,
) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line_width = settings.visuals.line_width;
}

/// Plugin that runs the spline camera modes.
///
/// Drives every `Camera3d` tagged with [`SplineCamView`].
///
/// # Hotkeys
/// - `1` / `2` / `3`: free cam / spline editor / follow spline
/// - `F1`: toggle wireframe flag
///
/// See [`SplineEditorState`](crate::state::SplineEditorState) and
/// [`FollowSplineState`](crate::state::FollowSplineState) for per-mode keys.
pub struct SplineCamPlugin;

impl Plugin for SplineCamPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<SplineCamSettings>()
            .cloned()
            .unwrap_or_default();
        let (registry, controller) = build_resources(&settings);

        app.insert_resource(settings)
            .insert_resource(registry)
            .insert_resource(controller)
            .add_systems(
                Update,
                (
                    systems::track_window_aspect,
                    systems::forward_input,
                    systems::update_controller,
                    systems::sync_camera,
                )
                    .chain(),
            );

        #[cfg(feature = "gizmos")]
        app.add_systems(
            Update,
            (sync_gizmo_config, gizmos::render_spline_overlay)
                .chain()
                .after(systems::sync_camera),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resources_start_free_cam() {
        let (registry, controller) = build_resources(&SplineCamSettings::default());
        assert_eq!(registry.len(), 1);
        assert_eq!(controller.active_kind(), Some(StateKind::FreeCam));
    }

    #[test]
    fn test_initial_editor_populates_registry() {
        let settings = SplineCamSettings::default().with_initial_mode(Some(StateKind::SplineEditor));
        let (registry, controller) = build_resources(&settings);
        assert!(registry.contains(0));
        assert_eq!(controller.active_kind(), Some(StateKind::SplineEditor));
    }

    #[test]
    fn test_failed_initial_mode_leaves_controller_idle() {
        let settings = SplineCamSettings {
            registry_slots: 0,
            initial_mode: Some(StateKind::FollowSpline),
            ..default()
        };
        let (_, controller) = build_resources(&settings);
        assert_eq!(controller.active_kind(), None);
    }

    #[test]
    fn test_plugin_inserts_resources() {
        let mut app = App::new();
        app.insert_resource(SplineCamSettings::default().with_initial_mode(None));
        app.add_plugins(SplineCamPlugin);

        assert!(app.world().contains_resource::<SplineRegistry>());
        let controller = app.world().resource::<ModeController>();
        assert_eq!(controller.active_kind(), None);
    }
}
