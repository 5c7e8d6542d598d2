//! Implementation of the build command.
//!
//! Runs the full packaging pipeline for one target platform and architecture,
//! then prints where the distributable was written.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use shellpack_lib::{BuildConfig, Reporter, TracingReporter, system_pipeline};

use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success};
use crate::reporter::TermReporter;

/// Execute the build command.
///
/// In JSON mode stage progress goes to the log instead of stdout, so stdout
/// only carries the result document.
pub fn cmd_build(config: &BuildConfig, format: OutputFormat) -> Result<()> {
  let reporter: Box<dyn Reporter> = if format.is_json() {
    Box::new(TracingReporter)
  } else {
    print_info(&format!("Building {} for {}", config.name, config.platform()));
    Box::new(TermReporter)
  };

  let pipeline = system_pipeline(reporter);
  let started = Instant::now();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let output = rt.block_on(pipeline.run(config)).context("Build failed")?;

  info!(elapsed = ?started.elapsed(), "pipeline finished");

  if format.is_json() {
    return print_json(&output);
  }

  println!();
  print_success(&format!("Build complete in {}", format_duration(started.elapsed())));
  print_stat("Distribution", &output.dist_dir.display().to_string());
  print_stat("Shell", &output.shell_dir.display().to_string());
  print_stat("Backend", &output.binary.display().to_string());

  Ok(())
}
