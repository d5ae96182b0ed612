//! Filter sessions.
//!
//! A session owns the current selection and recomputes the derived image
//! synchronously after every change.

pub mod engine;
pub mod stats;

pub use engine::FilterSession;
pub use stats::SessionStats;
