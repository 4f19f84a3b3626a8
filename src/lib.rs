//! # bevy_spline_cam
//!
//! Edit a smooth B-spline camera track in 3D and fly along it.
//!
//! ## Features
//!
//! - Uniform cubic B-spline, cyclic or clamped, with per-point orientation overrides
//! - Adaptive subdivision for drawing
//! - Free-fly, first-person and spline-following cameras
//! - Three switchable modes: free cam, spline editor, follow spline
//! - A shared spline registry so edits are seen by every mode
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_spline_cam::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SplineCamPlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn((Camera3d::default(), SplineCamView));
//! }
//! ```
//!
//! ## Without Bevy's scheduler
//!
//! The spline, cameras and states are plain structs. Drive them directly:
//!
//! ```ignore
//! let mut registry = SplineRegistry::new(1);
//! let mut controller = ModeController::default();
//! controller.select_mode(StateKind::FollowSpline, &mut registry)?;
//! controller.update(1.0 / 60.0, &HeldInputs::new(), &mut registry);
//! let frame = controller.render(&registry);
//! ```

pub mod camera;
pub mod error;
pub mod geometry;
pub mod input;
pub mod playback;
pub mod plugin;
pub mod spline;
pub mod state;

pub use error::{Result, SplineCamError};
pub use plugin::SplineCamPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::camera::{
        CameraKind, CameraRig, FirstPersonCamera, FollowSplineCamera, FreeCamera, MouseLook,
        PerspectiveParams,
    };
    pub use crate::error::SplineCamError;
    pub use crate::input::{HeldInputs, InputEvent, InputSource};
    pub use crate::playback::{AnimationCursor, PlaybackState};
    pub use crate::plugin::{GizmoVisuals, SplineCamPlugin, SplineCamSettings, SplineCamView};
    pub use crate::spline::{SamplingThresholds, Spline, SplinePreset, SplineRegistry};
    pub use crate::state::{
        ModeController, ModeSettings, RenderFrame, SplineCamState, SplineSource, SplineView,
        StateKind,
    };
}
