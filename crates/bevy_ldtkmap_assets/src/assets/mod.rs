//! Bevy asset types wrapping parsed LDtk data.

pub mod level;
pub mod project;
pub mod simplified;
pub mod world;
