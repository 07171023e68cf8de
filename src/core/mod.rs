//! Game rules, events and the controller state machine.

pub mod constants;
pub mod controller;
pub mod error;
pub mod events;

pub use constants::*;
pub use controller::*;
pub use error::*;
pub use events::*;
