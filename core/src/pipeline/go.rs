// goci/src/pipeline/go.rs

//! The built-in Go CI pipeline: build, test, format check, push.

use std::sync::Arc;

use crate::config::CiConfig;
use crate::core::launcher::CommandLauncher;
use crate::core::step::{StepDef, StepKind};
use crate::pipeline::definition::Pipeline;

pub const BUILD_STEP: &str = "go build";
pub const TEST_STEP: &str = "go test";
pub const FMT_STEP: &str = "go fmt";
pub const PUSH_STEP: &str = "git push";

impl Pipeline {
  /// Builds the fixed four-step pipeline for the project in `config`.
  ///
  /// `go build . errors` builds the package without leaving a binary behind
  /// (building two packages at once makes `go build` discard the output).
  pub fn go_ci(config: &CiConfig, launcher: Arc<dyn CommandLauncher>) -> Self {
    let dir = &config.project_path;
    let push_args = ["push", config.remote.as_str(), config.branch.as_str()];

    Pipeline::new(
      &[
        (
          StepDef::new(BUILD_STEP, "go", &["build", ".", "errors"], "Go build: successful", dir),
          StepKind::Plain,
        ),
        (
          StepDef::new(TEST_STEP, "go", &["test", "-v"], "Go test: successful", dir),
          StepKind::Plain,
        ),
        (
          StepDef::new(FMT_STEP, "gofmt", &["-l", "."], "Go fmt: successful", dir),
          StepKind::OutputSensitive,
        ),
        (
          StepDef::new(PUSH_STEP, "git", &push_args, "Git push: successful", dir),
          StepKind::TimeBounded(Some(config.push_timeout)),
        ),
      ],
      launcher,
    )
  }
}
