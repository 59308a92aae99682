// goci/src/error.rs
use anyhow::Error as AnyhowError;
use std::time::Duration;
use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::runner::signals::CancelSignal;

/// Why a child process did not complete successfully.
#[derive(Debug, Error)]
pub enum ProcessError {
  /// The launcher could not start (or wait on) the process at all.
  #[error("failed to launch `{program}`: {source}")]
  Launch {
    program: String,
    #[source]
    source: AnyhowError,
  },

  /// The process ran and exited with a non-zero status.
  /// `None` means it was terminated by a signal and has no exit code.
  #[error("{}", exit_description(.code))]
  Exit { code: Option<i32> },
}

fn exit_description(code: &Option<i32>) -> String {
  match *code {
    Some(code) => format!("exit status {code}"),
    None => "terminated by signal".to_string(),
  }
}

#[derive(Debug, Error)]
pub enum CiError {
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("configuration error: {0}")]
  Config(String),

  /// Non-zero exit or launch failure.
  #[error("step {step:?}: {message}: {source}")]
  StepExecution {
    step: String,
    message: String,
    #[source]
    source: ProcessError,
  },

  /// An output-sensitive step exited zero but printed something.
  #[error("step {step:?}: invalid format for file: {output}")]
  StepOutput { step: String, output: String },

  #[error("step {step:?}: failed: timed out after {}s: {source}", .timeout.as_secs_f64())]
  StepTimeout {
    step: String,
    timeout: Duration,
    #[source]
    source: Elapsed,
  },

  #[error("pipeline cancelled by {signal}")]
  Cancelled { signal: CancelSignal },

  #[error("failed to write step output: {0}")]
  Output(#[from] std::io::Error),

  #[error("internal goci error: {0}")]
  Internal(String),
}

impl CiError {
  /// Builds the generic "failed to execute" error for `step`.
  pub(crate) fn execution(step: &str, source: ProcessError) -> Self {
    CiError::StepExecution {
      step: step.to_string(),
      message: "failed to execute".to_string(),
      source,
    }
  }

  /// Name of the step that produced this error, if it came from a step.
  pub fn step_name(&self) -> Option<&str> {
    match self {
      CiError::StepExecution { step, .. } | CiError::StepOutput { step, .. } | CiError::StepTimeout { step, .. } => {
        Some(step)
      }
      _ => None,
    }
  }

  pub fn is_timeout(&self) -> bool {
    matches!(self, CiError::StepTimeout { .. })
  }

  pub fn is_cancelled(&self) -> bool {
    matches!(self, CiError::Cancelled { .. })
  }
}

pub type CiResult<T, E = CiError> = std::result::Result<T, E>;
