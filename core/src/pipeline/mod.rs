// goci/src/pipeline/mod.rs

//! Defines the `Pipeline` struct, its construction, and execution logic.

pub mod definition;
pub mod execution;
pub mod go;

// Re-export the main Pipeline struct
pub use definition::Pipeline;
