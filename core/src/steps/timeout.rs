// goci/src/steps/timeout.rs

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{event, Level};

use crate::core::launcher::{CommandLauncher, OutputMode};
use crate::core::step::{Step, StepDef, DEFAULT_STEP_TIMEOUT};
use crate::error::{CiError, CiResult};

/// Runs a command under a deadline.
///
/// A command still running when the deadline passes is reported as
/// [`CiError::StepTimeout`] rather than a generic execution failure. The
/// launch future is dropped at that point, which kills the child.
pub struct TimeoutStep {
  def: StepDef,
  launcher: Arc<dyn CommandLauncher>,
  timeout: Duration,
}

impl TimeoutStep {
  pub fn new(def: StepDef, launcher: Arc<dyn CommandLauncher>, timeout: Option<Duration>) -> Self {
    let timeout = match timeout {
      Some(t) if !t.is_zero() => t,
      _ => DEFAULT_STEP_TIMEOUT,
    };
    Self { def, launcher, timeout }
  }

  pub fn def(&self) -> &StepDef {
    &self.def
  }

  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

#[async_trait]
impl Step for TimeoutStep {
  fn name(&self) -> &str {
    &self.def.name
  }

  async fn execute(&self) -> CiResult<String> {
    let invocation = self.def.invocation();
    let launch = self.launcher.launch(&invocation, OutputMode::Discard);

    match tokio::time::timeout(self.timeout, launch).await {
      Err(elapsed) => {
        event!(
          Level::WARN,
          step = %self.def.name,
          timeout_secs = self.timeout.as_secs_f64(),
          "Deadline exceeded; process killed."
        );
        Err(CiError::StepTimeout {
          step: self.def.name.clone(),
          timeout: self.timeout,
          source: elapsed,
        })
      }
      Ok(result) => match result.and_then(|out| out.into_result()) {
        Ok(_) => Ok(self.def.message.clone()),
        Err(source) => {
          event!(Level::WARN, step = %self.def.name, error = %source, "Command failed.");
          Err(CiError::execution(&self.def.name, source))
        }
      },
    }
  }
}
