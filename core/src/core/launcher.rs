// goci/src/core/launcher.rs

//! The process-launching seam used by every step.
//!
//! Steps never build `tokio::process::Command`s themselves; they describe what
//! to run as an [`Invocation`] and hand it to an injected [`CommandLauncher`].
//! Production code uses [`SystemLauncher`]; tests swap in launchers that sleep
//! or answer with canned output without touching real tools.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{event, Level};

use crate::error::ProcessError;

/// What to run, with which arguments, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub dir: PathBuf,
}

impl Invocation {
  pub fn new(program: impl Into<String>, args: &[String], dir: impl AsRef<Path>) -> Self {
    Self {
      program: program.into(),
      args: args.to_vec(),
      dir: dir.as_ref().to_path_buf(),
    }
  }

  /// `program arg1 arg2 ...`, for logs.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// Whether the child's stdout is collected or thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
  Discard,
  Capture,
}

/// Exit code plus whatever stdout was captured (empty under [`OutputMode::Discard`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
  /// `None` if the process was terminated by a signal.
  pub code: Option<i32>,
  pub stdout: Vec<u8>,
}

impl ProcessOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  /// Converts a finished process into `Ok(self)` or the matching [`ProcessError::Exit`].
  pub fn into_result(self) -> Result<Self, ProcessError> {
    if self.success() {
      Ok(self)
    } else {
      Err(ProcessError::Exit { code: self.code })
    }
  }
}

/// Starts a command and waits for it to finish.
///
/// The returned future must own the child process: dropping it before it
/// resolves (which is how step deadlines and pipeline cancellation work) has
/// to terminate the process rather than leave it running.
#[async_trait]
pub trait CommandLauncher: Send + Sync {
  async fn launch(&self, invocation: &Invocation, mode: OutputMode) -> Result<ProcessOutput, ProcessError>;
}

/// Launches real OS processes through `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

#[async_trait]
impl CommandLauncher for SystemLauncher {
  async fn launch(&self, invocation: &Invocation, mode: OutputMode) -> Result<ProcessOutput, ProcessError> {
    let mut cmd = Command::new(&invocation.program);
    cmd
      .args(&invocation.args)
      .current_dir(&invocation.dir)
      .stdin(Stdio::null())
      .stderr(Stdio::null())
      // a dropped launch future must not leave an orphaned child behind
      .kill_on_drop(true);
    match mode {
      OutputMode::Discard => cmd.stdout(Stdio::null()),
      OutputMode::Capture => cmd.stdout(Stdio::piped()),
    };

    event!(
      Level::DEBUG,
      command = %invocation.command_line(),
      dir = %invocation.dir.display(),
      ?mode,
      "Spawning process."
    );

    let launch_err = |e: std::io::Error| ProcessError::Launch {
      program: invocation.program.clone(),
      source: e.into(),
    };

    let child = cmd.spawn().map_err(launch_err)?;
    let output = child.wait_with_output().await.map_err(launch_err)?;

    event!(Level::DEBUG, command = %invocation.command_line(), status = %output.status, "Process exited.");

    Ok(ProcessOutput {
      code: output.status.code(),
      stdout: output.stdout,
    })
  }
}
