//! Character progression and its persisted snapshot.

pub mod progression;
pub mod save;

pub use progression::*;
pub use save::*;
