//! Stage progress reporting.

use std::time::Duration;

use tracing::{error, info};

use super::types::{BuildError, Stage};

/// Receives progress of a pipeline run.
///
/// Handed to [`Pipeline::new`](super::Pipeline::new) so callers decide where
/// progress goes (terminal, log, test recorder).
pub trait Reporter {
  fn stage_started(&self, stage: Stage);
  fn stage_finished(&self, stage: Stage, elapsed: Duration);
  fn stage_failed(&self, stage: Stage, error: &BuildError);
}

/// Reports progress as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
  fn stage_started(&self, stage: Stage) {
    info!(%stage, "stage started");
  }

  fn stage_finished(&self, stage: Stage, elapsed: Duration) {
    info!(%stage, elapsed_ms = elapsed.as_millis() as u64, "stage finished");
  }

  fn stage_failed(&self, stage: Stage, error: &BuildError) {
    error!(%stage, %error, "stage failed");
  }
}
