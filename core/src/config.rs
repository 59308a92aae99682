// goci/src/config.rs

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CiError, CiResult};

/// Deadline for `git push` unless overridden.
pub const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters of the built-in Go CI pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiConfig {
  /// Project the pipeline runs in. Must be non-empty by the time the runner starts.
  pub project_path: PathBuf,
  pub push_timeout: Duration,
  pub remote: String,
  pub branch: String,
}

impl Default for CiConfig {
  fn default() -> Self {
    Self {
      project_path: PathBuf::new(),
      push_timeout: DEFAULT_PUSH_TIMEOUT,
      remote: "origin".to_string(),
      branch: "main".to_string(),
    }
  }
}

impl CiConfig {
  /// Reads `GOCI_PUSH_TIMEOUT_SECS`, `GOCI_GIT_REMOTE` and `GOCI_GIT_BRANCH`
  /// (loading a `.env` file first, if present). Unset variables keep their defaults.
  pub fn from_env() -> CiResult<Self> {
    dotenv().ok();

    let mut config = Self::default();

    if let Ok(raw) = env::var("GOCI_PUSH_TIMEOUT_SECS") {
      config.push_timeout = parse_timeout_secs(&raw)?;
    }
    if let Ok(remote) = env::var("GOCI_GIT_REMOTE") {
      config.remote = remote;
    }
    if let Ok(branch) = env::var("GOCI_GIT_BRANCH") {
      config.branch = branch;
    }

    tracing::debug!(config = ?config, "CI configuration loaded from environment.");
    Ok(config)
  }

  pub fn with_project(mut self, project_path: impl Into<PathBuf>) -> Self {
    self.project_path = project_path.into();
    self
  }

  pub fn validate(&self) -> CiResult<()> {
    if self.project_path.as_os_str().is_empty() {
      return Err(CiError::Validation("project path or directory is required".to_string()));
    }
    if self.remote.is_empty() || self.branch.is_empty() {
      return Err(CiError::Config("git remote and branch must not be empty".to_string()));
    }
    Ok(())
  }
}

/// Parses a whole number of seconds; zero is rejected.
pub fn parse_timeout_secs(raw: &str) -> CiResult<Duration> {
  let secs = raw
    .trim()
    .parse::<u64>()
    .map_err(|e| CiError::Config(format!("invalid push timeout '{}': {}", raw, e)))?;
  if secs == 0 {
    return Err(CiError::Config("push timeout must be greater than zero".to_string()));
  }
  Ok(Duration::from_secs(secs))
}
