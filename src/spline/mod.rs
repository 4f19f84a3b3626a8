mod components;
mod registry;
mod subdivision;
mod types;

pub use components::*;
pub use registry::*;
pub use subdivision::{subdivide_section, SectionSample};
pub use types::*;
