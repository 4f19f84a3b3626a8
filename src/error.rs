use thiserror::Error;

/// Errors surfaced by spline construction and registry access.
///
/// Interactive edits never fail; they clamp or turn into no-ops instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplineCamError {
    /// A spline needs at least two control points to define a section.
    #[error("spline needs at least {required} control points, got {found}")]
    NotEnoughControlPoints {
        /// Number of points supplied.
        found: usize,
        /// Minimum number of points accepted.
        required: usize,
    },
    /// The registry was asked for a slot it does not have.
    #[error("spline slot {index} is out of range (registry has {slots} slots)")]
    SlotOutOfRange {
        /// Requested slot.
        index: usize,
        /// Number of slots in the registry.
        slots: usize,
    },
}

/// Convenience alias used across the crate.
pub type Result<T, E = SplineCamError> = std::result::Result<T, E>;
