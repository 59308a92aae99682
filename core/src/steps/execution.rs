// goci/src/steps/execution.rs

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{event, Level};

use crate::core::launcher::{CommandLauncher, OutputMode};
use crate::core::step::{Step, StepDef};
use crate::error::{CiError, CiResult};

/// Runs a command whose stdout is the real verdict.
///
/// Some tools (`gofmt -l` being the obvious one) exit zero even when they
/// find problems and only list the offending files on stdout. This step
/// captures stdout and fails whenever anything was printed, regardless of
/// the exit code.
pub struct ExecutionStep {
  def: StepDef,
  launcher: Arc<dyn CommandLauncher>,
}

impl ExecutionStep {
  pub fn new(def: StepDef, launcher: Arc<dyn CommandLauncher>) -> Self {
    Self { def, launcher }
  }

  pub fn def(&self) -> &StepDef {
    &self.def
  }
}

#[async_trait]
impl Step for ExecutionStep {
  fn name(&self) -> &str {
    &self.def.name
  }

  async fn execute(&self) -> CiResult<String> {
    let invocation = self.def.invocation();
    let output = self
      .launcher
      .launch(&invocation, OutputMode::Capture)
      .await
      .and_then(|out| out.into_result())
      .map_err(|source| {
        event!(Level::WARN, step = %self.def.name, error = %source, "Command failed.");
        CiError::execution(&self.def.name, source)
      })?;

    if !output.stdout.is_empty() {
      let text = String::from_utf8_lossy(&output.stdout);
      event!(Level::WARN, step = %self.def.name, bytes = output.stdout.len(), "Command succeeded but produced output.");
      return Err(CiError::StepOutput {
        step: self.def.name.clone(),
        output: text.trim_end().to_string(),
      });
    }

    Ok(self.def.message.clone())
  }
}
