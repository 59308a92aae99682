// goci/examples/custom_pipeline.rs
//
// Runs a small shell-based pipeline through the same runner the `goci` binary
// uses: a plain step, an output-sensitive step, and a time-bounded step that
// is too slow for its deadline.

use goci::{CiConfig, CiError, Pipeline, Runner, StepDef, StepKind, SystemLauncher};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), CiError> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .with_writer(std::io::stderr)
    .init();

  info!("--- Custom Pipeline Example ---");

  let dir = std::env::temp_dir();
  let pipeline = Pipeline::new(
    &[
      (
        StepDef::new("greet", "sh", &["-c", "exit 0"], "Greet: successful", &dir),
        StepKind::Plain,
      ),
      (
        StepDef::new("quiet check", "sh", &["-c", "true"], "Quiet check: successful", &dir),
        StepKind::OutputSensitive,
      ),
      (
        StepDef::new("slow push", "sleep", &["5"], "Slow push: successful", &dir),
        StepKind::TimeBounded(Some(Duration::from_secs(1))),
      ),
    ],
    Arc::new(SystemLauncher),
  );

  let runner = Runner::system(CiConfig::default().with_project(&dir)).with_pipeline(pipeline);
  let mut stdout = std::io::stdout();

  match runner.run(&mut stdout).await {
    Ok(report) => info!(steps = report.messages.len(), "Pipeline completed."),
    Err(e) if e.is_timeout() => info!(error = %e, "Pipeline stopped on a timeout, as expected."),
    Err(e) => return Err(e),
  }
  Ok(())
}
