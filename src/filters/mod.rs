//! Filter module.
//!
//! Contains the filter catalog, the executor boundary and the built-in
//! filter implementations.

pub mod builtin;
pub mod catalog;
pub mod executor;

pub use catalog::FilterCatalog;
pub use executor::{BuiltinExecutor, ImageOperationExecutor};
