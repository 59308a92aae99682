// goci/src/core/step.rs

//! Defines the step descriptor and the `Step` contract every step kind implements.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::core::launcher::{CommandLauncher, Invocation};
use crate::error::CiResult;
use crate::steps::{CommandStep, ExecutionStep, TimeoutStep};

/// Deadline used by time-bounded steps that were not given one.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable description of a single pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  /// Identifier used in logs and error reports, e.g. `"go build"`.
  pub name: String,
  /// Executable to run.
  pub program: String,
  pub args: Vec<String>,
  /// Printed once the step succeeds.
  pub message: String,
  /// Working directory the command runs in.
  pub dir: PathBuf,
}

impl StepDef {
  pub fn new(
    name: impl Into<String>,
    program: impl Into<String>,
    args: &[&str],
    message: impl Into<String>,
    dir: impl AsRef<Path>,
  ) -> Self {
    Self {
      name: name.into(),
      program: program.into(),
      args: args.iter().map(|a| (*a).to_string()).collect(),
      message: message.into(),
      dir: dir.as_ref().to_path_buf(),
    }
  }

  pub fn invocation(&self) -> Invocation {
    Invocation::new(self.program.clone(), &self.args, &self.dir)
  }

  /// Builds the concrete step for `kind`, running its command through `launcher`.
  pub fn into_step(self, kind: StepKind, launcher: Arc<dyn CommandLauncher>) -> Box<dyn Step> {
    match kind {
      StepKind::Plain => Box::new(CommandStep::new(self, launcher)),
      StepKind::OutputSensitive => Box::new(ExecutionStep::new(self, launcher)),
      StepKind::TimeBounded(timeout) => Box::new(TimeoutStep::new(self, launcher, timeout)),
    }
  }
}

/// How a step decides whether its command succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
  /// Exit code zero means success.
  Plain,
  /// Exit code zero *and* no stdout means success.
  OutputSensitive,
  /// Exit code zero within the deadline means success.
  /// `None` (or a zero duration) falls back to [`DEFAULT_STEP_TIMEOUT`].
  TimeBounded(Option<Duration>),
}

/// One unit of pipeline work.
///
/// `execute` resolves to the step's success message, or to the error that
/// stops the pipeline.
#[async_trait]
pub trait Step: Send + Sync {
  fn name(&self) -> &str;

  async fn execute(&self) -> CiResult<String>;
}
