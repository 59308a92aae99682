// goci/src/steps/mod.rs

//! The three step kinds: plain exit-code check, output-sensitive, and time-bounded.

pub mod command;
pub mod execution;
pub mod timeout;

pub use command::CommandStep;
pub use execution::ExecutionStep;
pub use timeout::TimeoutStep;
