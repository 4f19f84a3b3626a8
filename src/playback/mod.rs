//! Playback of a normalized curve parameter.
//!
//! Both the editor's preview point and the follow camera ride the curve
//! with an [`AnimationCursor`]. Playback direction is re-evaluated every
//! frame from held input rather than queued.

mod cursor;

pub use cursor::*;
