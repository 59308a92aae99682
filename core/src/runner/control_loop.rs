// goci/src/runner/control_loop.rs

use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{event, instrument, Level};

use crate::config::CiConfig;
use crate::core::control::PipelineReport;
use crate::core::launcher::{CommandLauncher, SystemLauncher};
use crate::error::{CiError, CiResult};
use crate::pipeline::definition::Pipeline;
use crate::runner::signals::SignalListener;

/// Validates the configuration, runs the pipeline on a background task, and
/// stops at whichever comes first: success, a step failure, or a
/// cancellation signal.
pub struct Runner {
  config: CiConfig,
  launcher: Arc<dyn CommandLauncher>,
  pipeline: Option<Pipeline>,
}

impl Runner {
  /// A runner for the built-in Go pipeline, starting commands through `launcher`.
  pub fn new(config: CiConfig, launcher: Arc<dyn CommandLauncher>) -> Self {
    Self {
      config,
      launcher,
      pipeline: None,
    }
  }

  /// A runner that launches real OS processes.
  pub fn system(config: CiConfig) -> Self {
    Self::new(config, Arc::new(SystemLauncher))
  }

  /// Runs `pipeline` instead of the one built from the config.
  /// The project path is still validated.
  pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
    self.pipeline = Some(pipeline);
    self
  }

  pub fn config(&self) -> &CiConfig {
    &self.config
  }

  /// Runs the pipeline to completion or cancellation.
  ///
  /// Every success message is written to `out` as its own line, in step
  /// order, as soon as the foreground sees it. Messages from steps that
  /// finished before a failure or a signal stay written. A SIGINT/SIGTERM
  /// takes priority over whatever the in-flight step would have returned: the
  /// pipeline task is aborted (killing its child process) and
  /// [`CiError::Cancelled`] is returned.
  #[instrument(
    name = "Runner::run",
    skip_all,
    fields(project = %self.config.project_path.display()),
    err(Display)
  )]
  pub async fn run<W: Write>(self, out: &mut W) -> CiResult<PipelineReport> {
    self.config.validate()?;

    let pipeline = match self.pipeline {
      Some(pipeline) => pipeline,
      None => Pipeline::go_ci(&self.config, self.launcher.clone()),
    };
    event!(Level::INFO, steps = ?pipeline.step_names(), "Starting pipeline.");

    let mut signals = SignalListener::subscribe()?;
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let mut task: JoinHandle<CiResult<PipelineReport>> = tokio::spawn(async move {
      let mut tx = tx;
      pipeline.run(&mut tx).await
    });

    let outcome = loop {
      tokio::select! {
        biased;

        signal = signals.recv() => {
          event!(Level::WARN, %signal, "Cancellation signal received; abandoning pipeline.");
          break Err(CiError::Cancelled { signal });
        }

        Some(line) = rx.recv() => {
          if let Err(e) = write_line(out, &line) {
            break Err(e);
          }
        }

        joined = &mut task => {
          let mut drained = Ok(());
          while let Ok(line) = rx.try_recv() {
            drained = drained.and_then(|_| write_line(out, &line));
          }
          break match joined {
            Ok(result) => drained.and(result),
            Err(e) => Err(CiError::Internal(format!("pipeline task failed: {}", e))),
          };
        }
      }
    };

    // stop listening before reporting
    drop(signals);
    if !task.is_finished() {
      task.abort();
      // resolves once the aborted task has been dropped, not when the step would have finished
      let _ = task.await;
    }

    // steps that finished before the signal won still get their line
    if matches!(outcome, Err(CiError::Cancelled { .. })) {
      while let Ok(line) = rx.try_recv() {
        if let Err(e) = write_line(out, &line) {
          event!(Level::WARN, error = %e, "Could not write queued message after cancellation.");
          break;
        }
      }
    }

    match &outcome {
      Ok(report) => event!(Level::INFO, completed = report.messages.len(), "Pipeline finished."),
      Err(e) => event!(Level::ERROR, error = %e, step = e.step_name().unwrap_or("-"), "Pipeline did not finish."),
    }
    outcome
  }
}

fn write_line<W: Write>(out: &mut W, line: &str) -> CiResult<()> {
  writeln!(out, "{line}")?;
  out.flush()?;
  Ok(())
}
