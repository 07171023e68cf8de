//! Utility modules: persistence and build info.

pub mod build_info;
pub mod persistence;

pub use persistence::{data_dir, FileStore, KeyValueStore, MemoryStore};
