// goci-cli/src/args.rs

use clap::Parser;
use goci::config::parse_timeout_secs;
use goci::{CiConfig, CiResult};

/// Build, test, format-check and push a Go project, stopping at the first failure.
#[derive(Debug, Parser)]
#[command(name = "goci", version, about)]
pub struct Args {
  /// Project path or directory
  #[arg(short = 'p', long = "proj", default_value = "")]
  pub proj: String,

  /// Seconds `git push` may run before it is killed [env: GOCI_PUSH_TIMEOUT_SECS, default: 10]
  #[arg(long, value_name = "SECS")]
  pub push_timeout: Option<String>,

  /// Remote to push to [env: GOCI_GIT_REMOTE, default: origin]
  #[arg(long)]
  pub remote: Option<String>,

  /// Branch to push [env: GOCI_GIT_BRANCH, default: main]
  #[arg(long)]
  pub branch: Option<String>,
}

impl Args {
  /// Environment first, then flags on top.
  pub fn into_config(self) -> CiResult<CiConfig> {
    // a missing project is reported ahead of any bad override
    CiConfig::default().with_project(&self.proj).validate()?;

    let mut config = CiConfig::from_env()?.with_project(self.proj);
    if let Some(raw) = self.push_timeout {
      config.push_timeout = parse_timeout_secs(&raw)?;
    }
    if let Some(remote) = self.remote {
      config.remote = remote;
    }
    if let Some(branch) = self.branch {
      config.branch = branch;
    }
    Ok(config)
  }
}
