pub mod control;
pub mod launcher;
pub mod step;

// Re-export key types for easier access from other goci modules (and lib.rs)
pub use control::{MessageSink, PipelineReport, WriterSink};
pub use launcher::{CommandLauncher, Invocation, OutputMode, ProcessOutput, SystemLauncher};
pub use step::{Step, StepDef, StepKind, DEFAULT_STEP_TIMEOUT};
