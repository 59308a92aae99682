// goci/src/lib.rs

//! goci: an ASYNC continuous-integration pipeline runner for Go projects.
//!
//! goci runs a fixed, ordered list of external commands against a project
//! directory and stops at the first one that fails:
//!  - `go build`, `go test`: plain steps, judged by exit code.
//!  - `gofmt -l`: an output-sensitive step, where any stdout means failure.
//!  - `git push`: a time-bounded step, where running past its deadline is
//!    reported as a timeout and the child process is killed.
//!
//! Each step's success message is written as soon as it finishes. The whole
//! run can be cancelled by SIGINT or SIGTERM, which wins over whatever the
//! in-flight step would have returned.
//!
//! Process creation goes through the [`CommandLauncher`] trait, so tests can
//! swap in launchers that never start real tools.

pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod steps;

// --- Re-exports for the Public API ---

pub use crate::core::control::{MessageSink, PipelineReport, WriterSink};
pub use crate::core::launcher::{CommandLauncher, Invocation, OutputMode, ProcessOutput, SystemLauncher};
pub use crate::core::step::{Step, StepDef, StepKind, DEFAULT_STEP_TIMEOUT};

pub use crate::steps::{CommandStep, ExecutionStep, TimeoutStep};

pub use crate::pipeline::definition::Pipeline;
pub use crate::pipeline::go::{BUILD_STEP, FMT_STEP, PUSH_STEP, TEST_STEP};

pub use crate::runner::{CancelSignal, Runner, SignalListener};

pub use crate::config::{CiConfig, DEFAULT_PUSH_TIMEOUT};
pub use crate::error::{CiError, CiResult, ProcessError};
