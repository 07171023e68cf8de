//! Run timing.

pub mod clock;
pub mod run_timer;

pub use clock::*;
pub use run_timer::*;
