// goci/src/runner/mod.rs

//! Top-level control loop: runs the pipeline on a background task and races it
//! against OS cancellation signals.

pub mod control_loop;
pub mod signals;

pub use control_loop::Runner;
pub use signals::{CancelSignal, SignalListener};
