// goci-cli/src/main.rs

mod args;

use clap::Parser;
use goci::Runner;
use std::io::Write;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

#[tokio::main]
async fn main() {
  // Logs go to stderr; stdout only carries step messages.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();

  let args = Args::parse();
  let stdout = std::io::stdout();
  let mut out = stdout.lock();

  if let Err(e) = run(args, &mut out).await {
    eprintln!("{}", e);
    std::process::exit(1);
  }
}

async fn run(args: Args, out: &mut impl Write) -> anyhow::Result<()> {
  let config = args.into_config()?;
  tracing::info!(project = %config.project_path.display(), "goci starting.");

  let report = Runner::system(config).run(out).await?;
  tracing::info!(steps = report.messages.len(), "All steps succeeded.");
  Ok(())
}
