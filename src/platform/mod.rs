//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard, touch overlay)
//! - Storage (LocalStorage on web, in-memory on native)

pub mod input;
pub mod storage;

pub use input::{Action, Controls, OverlayButton};
pub use storage::StorageError;
