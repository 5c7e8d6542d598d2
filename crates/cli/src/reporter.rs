//! Terminal progress for pipeline stages.

use std::time::Duration;

use shellpack_lib::{BuildError, Reporter, Stage};

use crate::output::{format_duration, print_error, print_step, print_success};

/// Prints one line per stage transition.
pub struct TermReporter;

impl Reporter for TermReporter {
  fn stage_started(&self, stage: Stage) {
    print_step(&format!("{}...", stage));
  }

  fn stage_finished(&self, stage: Stage, elapsed: Duration) {
    print_success(&format!("{} ({})", stage, format_duration(elapsed)));
  }

  fn stage_failed(&self, stage: Stage, _error: &BuildError) {
    // The error itself is printed once, on exit.
    print_error(&format!("{} failed", stage));
  }
}
