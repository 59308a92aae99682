// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use goci::{CommandLauncher, Invocation, OutputMode, ProcessError, ProcessOutput};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Canned process behaviour ---
#[derive(Clone, Debug)]
pub struct FakeResponse {
  pub code: Option<i32>,
  pub stdout: String,
  pub delay: Duration,
  pub launch_error: Option<String>,
}

impl FakeResponse {
  /// Exits 0 immediately with no output.
  pub fn ok() -> Self {
    Self {
      code: Some(0),
      stdout: String::new(),
      delay: Duration::ZERO,
      launch_error: None,
    }
  }

  pub fn exit(code: i32) -> Self {
    Self {
      code: Some(code),
      ..Self::ok()
    }
  }

  /// Exits 0 after printing `text`.
  pub fn output(text: &str) -> Self {
    Self {
      stdout: text.to_string(),
      ..Self::ok()
    }
  }

  pub fn cannot_launch(reason: &str) -> Self {
    Self {
      launch_error: Some(reason.to_string()),
      ..Self::ok()
    }
  }

  /// Same response, but only after sleeping on the tokio clock.
  pub fn after(mut self, delay: Duration) -> Self {
    self.delay = delay;
    self
  }
}

/// A launcher that never starts a real process.
///
/// Responses are matched by command-line prefix (`"go build"`, `"gofmt"`,
/// `"git push"`), first match wins; anything unmatched exits 0 silently.
#[derive(Default)]
pub struct FakeLauncher {
  responses: Vec<(String, FakeResponse)>,
  calls: Mutex<Vec<(Invocation, OutputMode)>>,
  /// Launches whose future was dropped before it resolved (deadline or abort).
  abandoned: AtomicUsize,
}

impl FakeLauncher {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn respond(mut self, prefix: &str, response: FakeResponse) -> Self {
    self.responses.push((prefix.to_string(), response));
    self
  }

  pub fn shared(self) -> Arc<Self> {
    Arc::new(self)
  }

  pub fn calls(&self) -> Vec<(Invocation, OutputMode)> {
    self.calls.lock().clone()
  }

  /// Command lines launched so far, in order.
  pub fn command_lines(&self) -> Vec<String> {
    self.calls.lock().iter().map(|(inv, _)| inv.command_line()).collect()
  }

  pub fn abandoned(&self) -> usize {
    self.abandoned.load(Ordering::SeqCst)
  }

  fn response_for(&self, invocation: &Invocation) -> FakeResponse {
    let line = invocation.command_line();
    self
      .responses
      .iter()
      .find(|(prefix, _)| line.starts_with(prefix.as_str()))
      .map(|(_, r)| r.clone())
      .unwrap_or_else(FakeResponse::ok)
  }
}

/// Counts the launch as abandoned unless it was disarmed on completion.
struct AbandonGuard<'a> {
  counter: &'a AtomicUsize,
  armed: bool,
}

impl Drop for AbandonGuard<'_> {
  fn drop(&mut self) {
    if self.armed {
      self.counter.fetch_add(1, Ordering::SeqCst);
    }
  }
}

#[async_trait]
impl CommandLauncher for FakeLauncher {
  async fn launch(&self, invocation: &Invocation, mode: OutputMode) -> Result<ProcessOutput, ProcessError> {
    self.calls.lock().push((invocation.clone(), mode));
    let response = self.response_for(invocation);
    tracing::debug!(target: "fake_launcher", command = %invocation.command_line(), ?response, "launch");

    let mut guard = AbandonGuard {
      counter: &self.abandoned,
      armed: true,
    };
    if !response.delay.is_zero() {
      tokio::time::sleep(response.delay).await;
    }
    guard.armed = false;

    if let Some(reason) = response.launch_error {
      return Err(ProcessError::Launch {
        program: invocation.program.clone(),
        source: anyhow::anyhow!(reason),
      });
    }

    let stdout = match mode {
      OutputMode::Capture => response.stdout.into_bytes(),
      OutputMode::Discard => Vec::new(),
    };
    Ok(ProcessOutput {
      code: response.code,
      stdout,
    })
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub const ALL_MESSAGES: [&str; 4] = [
  "Go build: successful",
  "Go test: successful",
  "Go fmt: successful",
  "Git push: successful",
];

pub fn project_config() -> goci::CiConfig {
  goci::CiConfig::default().with_project("./testdata/tool")
}
