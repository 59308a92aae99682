// goci/src/steps/command.rs

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{event, Level};

use crate::core::launcher::{CommandLauncher, OutputMode};
use crate::core::step::{Step, StepDef};
use crate::error::{CiError, CiResult};

/// Runs a command and succeeds iff it exits with status zero.
///
/// The child's output is discarded.
pub struct CommandStep {
  def: StepDef,
  launcher: Arc<dyn CommandLauncher>,
}

impl CommandStep {
  pub fn new(def: StepDef, launcher: Arc<dyn CommandLauncher>) -> Self {
    Self { def, launcher }
  }

  pub fn def(&self) -> &StepDef {
    &self.def
  }
}

#[async_trait]
impl Step for CommandStep {
  fn name(&self) -> &str {
    &self.def.name
  }

  async fn execute(&self) -> CiResult<String> {
    let invocation = self.def.invocation();
    let result = self.launcher.launch(&invocation, OutputMode::Discard).await;

    match result.and_then(|out| out.into_result()) {
      Ok(_) => Ok(self.def.message.clone()),
      Err(source) => {
        event!(Level::WARN, step = %self.def.name, error = %source, "Command failed.");
        Err(CiError::execution(&self.def.name, source))
      }
    }
  }
}
