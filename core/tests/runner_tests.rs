// tests/runner_tests.rs
mod common;
use common::*;
use goci::{CiConfig, CiError, Pipeline, Runner, StepDef, StepKind};
use serial_test::serial;
use std::time::Duration;

async fn run_to_string(runner: Runner) -> (Result<goci::PipelineReport, CiError>, String) {
  let mut out: Vec<u8> = Vec::new();
  let result = runner.run(&mut out).await;
  (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
#[serial]
async fn test_empty_project_path_is_a_validation_error() {
  setup_tracing();
  let launcher = FakeLauncher::new().shared();
  let runner = Runner::new(CiConfig::default(), launcher.clone());

  let (result, out) = run_to_string(runner).await;

  assert!(matches!(result, Err(CiError::Validation(_))));
  assert!(out.is_empty());
  assert!(launcher.calls().is_empty());
}

#[tokio::test]
#[serial]
async fn test_validation_applies_to_custom_pipelines_too() {
  setup_tracing();
  let launcher = FakeLauncher::new().shared();
  let pipeline = Pipeline::new(
    &[(StepDef::new("anything", "true", &[], "ok", "."), StepKind::Plain)],
    launcher.clone(),
  );
  let runner = Runner::new(CiConfig::default(), launcher.clone()).with_pipeline(pipeline);

  let (result, out) = run_to_string(runner).await;

  assert!(matches!(result, Err(CiError::Validation(_))));
  assert!(out.is_empty());
  assert!(launcher.calls().is_empty());
}

#[tokio::test]
#[serial]
async fn test_successful_run_writes_four_lines() {
  setup_tracing();
  let launcher = FakeLauncher::new()
    .respond("git push", FakeResponse::output("Everything up-to-date"))
    .shared();
  let runner = Runner::new(project_config(), launcher);

  let (result, out) = run_to_string(runner).await;

  let report = result.unwrap();
  assert_eq!(report.messages, ALL_MESSAGES);
  assert_eq!(
    out,
    "Go build: successful\nGo test: successful\nGo fmt: successful\nGit push: successful\n"
  );
}

#[tokio::test]
#[serial]
async fn test_failed_build_writes_nothing() {
  setup_tracing();
  let launcher = FakeLauncher::new().respond("go build", FakeResponse::exit(1)).shared();
  let runner = Runner::new(project_config(), launcher.clone());

  let (result, out) = run_to_string(runner).await;

  let err = result.unwrap_err();
  assert_eq!(err.step_name(), Some("go build"));
  assert!(err.to_string().contains("go build"));
  assert!(out.is_empty());
  assert_eq!(launcher.calls().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_failed_fmt_keeps_earlier_lines() {
  setup_tracing();
  let launcher = FakeLauncher::new().respond("gofmt", FakeResponse::output("file.go")).shared();
  let runner = Runner::new(project_config(), launcher);

  let (result, out) = run_to_string(runner).await;

  let err = result.unwrap_err();
  assert!(matches!(err, CiError::StepOutput { .. }));
  assert!(err.to_string().contains("file.go"));
  assert_eq!(out, "Go build: successful\nGo test: successful\n");
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_push_timeout_keeps_three_lines() {
  setup_tracing();
  let launcher = FakeLauncher::new()
    .respond("git push", FakeResponse::ok().after(Duration::from_secs(11)))
    .shared();
  let runner = Runner::new(project_config(), launcher.clone());

  let (result, out) = run_to_string(runner).await;

  let err = result.unwrap_err();
  assert!(err.is_timeout());
  assert_eq!(err.step_name(), Some("git push"));
  assert_eq!(out, "Go build: successful\nGo test: successful\nGo fmt: successful\n");
  assert_eq!(launcher.abandoned(), 1);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_lines_are_written_while_pipeline_is_still_running() {
  setup_tracing();
  // slow steps leave plenty of room for the foreground to flush earlier lines
  let launcher = FakeLauncher::new()
    .respond("go test", FakeResponse::ok().after(Duration::from_secs(3)))
    .respond("gofmt", FakeResponse::exit(1).after(Duration::from_secs(3)))
    .shared();
  let runner = Runner::new(project_config(), launcher);

  let (result, out) = run_to_string(runner).await;

  assert_eq!(result.unwrap_err().step_name(), Some("go fmt"));
  assert_eq!(out, "Go build: successful\nGo test: successful\n");
}

/// A writer whose every write fails.
struct BrokenPipe;

impl std::io::Write for BrokenPipe {
  fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
    Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
  }

  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

#[tokio::test]
#[serial]
async fn test_output_failure_stops_the_run() {
  setup_tracing();
  let launcher = FakeLauncher::new().shared();
  let runner = Runner::new(project_config(), launcher);

  let result = runner.run(&mut BrokenPipe).await;

  assert!(matches!(result, Err(CiError::Output(_))));
}
