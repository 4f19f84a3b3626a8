use bevy::prelude::*;

use crate::error::{Result, SplineCamError};

use super::components::Spline;

/// Named default layouts used to populate an empty registry slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplinePreset {
    /// Clamped five-point path through the demo room, with orientation
    /// overrides on the three inner points.
    #[default]
    DemoRoom,
    /// Cyclic eight-point track with a climb on the far side.
    LoopTrack,
}

impl SplinePreset {
    /// Get the display name for this preset.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DemoRoom => "Demo Room",
            Self::LoopTrack => "Loop Track",
        }
    }

    pub fn control_points(&self) -> Vec<Vec3> {
        match self {
            Self::DemoRoom => vec![
                Vec3::new(0.0, 1.0, -15.0),
                Vec3::new(0.0, 1.0, -3.0),
                Vec3::new(-11.0, 1.0, -2.0),
                Vec3::new(-11.0, 1.0, 3.5),
                Vec3::new(-2.6, 1.0, 3.5),
            ],
            Self::LoopTrack => vec![
                Vec3::new(0.0, 1.0, -12.0),
                Vec3::new(8.0, 1.0, -8.0),
                Vec3::new(12.0, 2.0, 0.0),
                Vec3::new(8.0, 4.0, 8.0),
                Vec3::new(0.0, 6.0, 12.0),
                Vec3::new(-8.0, 4.0, 8.0),
                Vec3::new(-12.0, 2.0, 0.0),
                Vec3::new(-8.0, 1.0, -8.0),
            ],
        }
    }

    pub fn orientations(&self) -> Vec<Option<Vec3>> {
        match self {
            Self::DemoRoom => vec![
                None,
                Some(Vec3::new(1.0, 0.5, 1.0)),
                Some(Vec3::new(0.0, 0.0, 1.0)),
                Some(Vec3::new(0.0, -0.25, 1.0)),
                None,
            ],
            Self::LoopTrack => vec![None; 8],
        }
    }

    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::LoopTrack)
    }

    /// Build a fresh spline from this preset.
    pub fn build(&self) -> Result<Spline> {
        let spline = if self.is_cyclic() {
            Spline::cyclic(self.control_points())?
        } else {
            Spline::new(self.control_points())?
        };
        Ok(spline.with_orientations(self.orientations()))
    }
}

/// Fixed set of spline slots shared between camera states.
///
/// Slots start empty and are populated on first use through
/// [`SplineRegistry::get_or_insert_with`], so edits made by one state are
/// seen by every other state that uses the same slot.
#[derive(Resource, Debug, Clone, Default)]
pub struct SplineRegistry {
    slots: Vec<Option<Spline>>,
}

impl SplineRegistry {
    /// Create a registry with `slots` empty slots.
    pub fn new(slots: usize) -> Self {
        Self {
            slots: vec![None; slots],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Spline> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Spline> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Whether the slot holds a spline.
    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Return the spline in `index`, building it with `factory` if the slot is empty.
    pub fn get_or_insert_with<F>(&mut self, index: usize, factory: F) -> Result<&mut Spline>
    where
        F: FnOnce() -> Result<Spline>,
    {
        let slots = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SplineCamError::SlotOutOfRange { index, slots })?;

        let spline = match slot.take() {
            Some(spline) => spline,
            None => {
                info!("Populating spline slot {index}");
                factory()?
            }
        };
        Ok(slot.insert(spline))
    }

    /// Store a spline, replacing whatever the slot held.
    pub fn insert(&mut self, index: usize, spline: Spline) -> Result<Option<Spline>> {
        let slots = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SplineCamError::SlotOutOfRange { index, slots })?;
        Ok(slot.replace(spline))
    }

    /// Empty a slot, returning its spline.
    pub fn clear(&mut self, index: usize) -> Option<Spline> {
        self.slots.get_mut(index).and_then(Option::take)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_build() {
        let room = SplinePreset::DemoRoom.build().unwrap();
        assert_eq!(room.control_points().len(), 5);
        assert!(!room.is_cyclic());
        assert!(room.orientations()[2].is_some());

        let track = SplinePreset::LoopTrack.build().unwrap();
        assert!(track.is_cyclic());
        assert_eq!(track.section_count(), 8);
    }

    #[test]
    fn test_get_or_insert_populates_once() {
        let mut registry = SplineRegistry::new(2);
        assert!(!registry.contains(0));

        registry
            .get_or_insert_with(0, || SplinePreset::DemoRoom.build())
            .unwrap()
            .translate_control_point(Vec3::Y);

        // Second call must not rebuild and lose the edit.
        let spline = registry
            .get_or_insert_with(0, || SplinePreset::LoopTrack.build())
            .unwrap();
        assert!(!spline.is_cyclic());
        assert!((spline.control_points()[0].y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_slot() {
        let mut registry = SplineRegistry::new(1);
        let err = registry
            .get_or_insert_with(3, || SplinePreset::DemoRoom.build())
            .unwrap_err();
        assert_eq!(err, SplineCamError::SlotOutOfRange { index: 3, slots: 1 });
        assert!(registry.get(3).is_none());
    }

    #[test]
    fn test_failed_factory_leaves_slot_empty() {
        let mut registry = SplineRegistry::new(1);
        let result = registry.get_or_insert_with(0, || Spline::new(Vec::new()));
        assert!(result.is_err());
        assert!(!registry.contains(0));
    }

    #[test]
    fn test_insert_and_clear() {
        let mut registry = SplineRegistry::new(1);
        let previous = registry
            .insert(0, SplinePreset::LoopTrack.build().unwrap())
            .unwrap();
        assert!(previous.is_none());
        assert!(registry.clear(0).is_some());
        assert!(registry.get_mut(0).is_none());
    }
}
