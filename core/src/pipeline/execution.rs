// goci/src/pipeline/execution.rs

//! Contains `Pipeline::run()`, which executes the steps in order and stops at the first failure.

use tracing::{event, instrument, span, Instrument, Level};

use crate::core::control::{MessageSink, PipelineReport};
use crate::error::CiResult;
use crate::pipeline::definition::Pipeline;

impl Pipeline {
  /// Executes every step in order, one at a time.
  ///
  /// Each success message is handed to `sink` as soon as its step finishes,
  /// before the next step starts. The first error stops the run and is
  /// returned as-is; steps after it are never started.
  #[instrument(name = "Pipeline::run", skip_all, fields(num_steps = self.steps.len()), err(Display))]
  pub async fn run(&self, sink: &mut dyn MessageSink) -> CiResult<PipelineReport> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let mut report = PipelineReport::default();

    for (step_idx, step) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step.name(),
        step_index = step_idx
      );

      let message = async {
        event!(Level::DEBUG, "Processing step.");
        match step.execute().await {
          Ok(message) => {
            event!(Level::INFO, "Step succeeded.");
            Ok(message)
          }
          Err(e) => {
            event!(Level::ERROR, error = %e, "Step failed; stopping pipeline.");
            Err(e)
          }
        }
      }
      .instrument(step_span)
      .await?;

      sink.emit(&message)?;
      report.messages.push(message);
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(report)
  }
}
