// goci/src/pipeline/definition.rs

//! Contains the `Pipeline` struct definition and methods for its construction.

use std::sync::Arc;

use crate::core::launcher::CommandLauncher;
use crate::core::step::{Step, StepDef, StepKind};

/// An ordered list of steps, executed one after another.
///
/// Insertion order is execution order. Later steps may rely on earlier ones
/// having succeeded (a push assumes build, test and format passed), so the
/// order is never changed once the pipeline is built.
pub struct Pipeline {
  pub(crate) steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
  /// Creates a pipeline from step definitions, all sharing one `launcher`.
  pub fn new(step_defs: &[(StepDef, StepKind)], launcher: Arc<dyn CommandLauncher>) -> Self {
    let steps = step_defs
      .iter()
      .map(|(def, kind)| def.clone().into_step(*kind, launcher.clone()))
      .collect();

    Self { steps }
  }

  /// An empty pipeline; steps are appended with [`Pipeline::push`].
  pub fn empty() -> Self {
    Self { steps: Vec::new() }
  }

  /// Appends a step after all existing ones.
  pub fn push(&mut self, step: Box<dyn Step>) -> &mut Self {
    self.steps.push(step);
    self
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Step names in execution order.
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name()).collect()
  }
}

impl std::fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline").field("steps", &self.step_names()).finish()
  }
}
