// goci/src/core/control.rs

//! Where step success messages go, and what a completed pipeline run reports.

use std::io::Write;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::{CiError, CiResult};

/// Receives each step's success message as soon as that step finishes.
pub trait MessageSink: Send {
  fn emit(&mut self, message: &str) -> CiResult<()>;
}

/// Writes each message as one line to the wrapped writer.
#[derive(Debug)]
pub struct WriterSink<W: Write + Send>(pub W);

impl<W: Write + Send> MessageSink for WriterSink<W> {
  fn emit(&mut self, message: &str) -> CiResult<()> {
    writeln!(self.0, "{message}")?;
    self.0.flush()?;
    Ok(())
  }
}

impl MessageSink for Vec<String> {
  fn emit(&mut self, message: &str) -> CiResult<()> {
    self.push(message.to_string());
    Ok(())
  }
}

/// Forwards messages from the pipeline task to the runner, which owns the real output.
impl MessageSink for UnboundedSender<String> {
  fn emit(&mut self, message: &str) -> CiResult<()> {
    self
      .send(message.to_string())
      .map_err(|_| CiError::Internal("message receiver dropped before the pipeline finished".to_string()))
  }
}

/// Outcome of a pipeline that ran every step successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
  /// Success messages, in step order.
  pub messages: Vec<String>,
}
