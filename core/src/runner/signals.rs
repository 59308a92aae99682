// goci/src/runner/signals.rs

use std::fmt;

use crate::error::{CiError, CiResult};

/// Signals that cancel a running pipeline.
///
/// This is a fixed set: SIGQUIT, SIGHUP and friends are deliberately not in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelSignal {
  /// SIGINT (Ctrl-C).
  Interrupt,
  /// SIGTERM.
  Terminate,
}

impl CancelSignal {
  pub const ALL: [CancelSignal; 2] = [CancelSignal::Interrupt, CancelSignal::Terminate];

  pub fn as_str(&self) -> &'static str {
    match self {
      CancelSignal::Interrupt => "SIGINT",
      CancelSignal::Terminate => "SIGTERM",
    }
  }
}

impl fmt::Display for CancelSignal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Live subscription to the cancellation signals.
///
/// Listeners are registered by [`SignalListener::subscribe`] and dropped with
/// it. The process-wide handler tokio installs stays in place, so after a run
/// SIGINT and SIGTERM no longer terminate the host process by default.
#[cfg(unix)]
pub struct SignalListener {
  interrupt: tokio::signal::unix::Signal,
  terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl SignalListener {
  pub fn subscribe() -> CiResult<Self> {
    use tokio::signal::unix::{signal, SignalKind};

    let install = |kind: SignalKind, which: CancelSignal| {
      signal(kind).map_err(|e| CiError::Internal(format!("failed to listen for {}: {}", which, e)))
    };

    Ok(Self {
      interrupt: install(SignalKind::interrupt(), CancelSignal::Interrupt)?,
      terminate: install(SignalKind::terminate(), CancelSignal::Terminate)?,
    })
  }

  /// Waits for the next cancellation signal.
  pub async fn recv(&mut self) -> CancelSignal {
    tokio::select! {
      Some(()) = self.interrupt.recv() => CancelSignal::Interrupt,
      Some(()) = self.terminate.recv() => CancelSignal::Terminate,
      else => std::future::pending().await,
    }
  }
}

#[cfg(not(unix))]
pub struct SignalListener {
  _private: (),
}

#[cfg(not(unix))]
impl SignalListener {
  pub fn subscribe() -> CiResult<Self> {
    Ok(Self { _private: () })
  }

  /// Only Ctrl-C is observable here; it maps to [`CancelSignal::Interrupt`].
  pub async fn recv(&mut self) -> CancelSignal {
    match tokio::signal::ctrl_c().await {
      Ok(()) => CancelSignal::Interrupt,
      Err(e) => {
        tracing::warn!(error = %e, "Ctrl-C handler unavailable; cancellation disabled.");
        std::future::pending().await
      }
    }
  }
}
