//! Equipment unlock table.

pub mod equipment;

pub use equipment::*;
