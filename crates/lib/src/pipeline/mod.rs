//! Build Orchestrator.
//!
//! Runs the packaging pipeline for one [`BuildConfig`]:
//!
//! 1. create the staging structure (delegated to a [`Scaffold`])
//! 2. package the rendering shell with the frontend packager
//! 3. merge the packaged shell into the distribution folder
//! 4. cross-compile the backend and place its binary
//! 5. remove the staging directory
//!
//! Stages run strictly in order. The first error aborts the run and nothing
//! already produced is rolled back.

pub mod commands;
mod layout;
mod report;
mod types;

use std::time::Instant;

use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::process::Runner;
use crate::scaffold::Scaffold;
use crate::stager;

pub use layout::DistLayout;
pub use report::{Reporter, TracingReporter};
pub use types::{BuildError, BuildOutput, PipelineState, Stage};

/// The packaging pipeline, wired to its collaborators.
pub struct Pipeline<R, S> {
  runner: R,
  scaffold: S,
  reporter: Box<dyn Reporter>,
}

impl<R: Runner, S: Scaffold> Pipeline<R, S> {
  pub fn new(runner: R, scaffold: S, reporter: Box<dyn Reporter>) -> Self {
    Self {
      runner,
      scaffold,
      reporter,
    }
  }

  /// Run every stage for `config`.
  ///
  /// The configuration is validated before any external program is started.
  pub async fn run(&self, config: &BuildConfig) -> Result<BuildOutput, BuildError> {
    config.validate()?;

    let layout = DistLayout::new(config);
    debug!(?layout, "computed output layout");

    let mut state = PipelineState::Init;
    while let Some(stage) = state.next_stage() {
      self.reporter.stage_started(stage);
      let started = Instant::now();

      if let Err(err) = self.run_stage(stage, config, &layout).await {
        debug!(from = %state, to = %PipelineState::Failed, %stage, "pipeline aborted");
        self.reporter.stage_failed(stage, &err);
        return Err(err);
      }

      self.reporter.stage_finished(stage, started.elapsed());
      let next = stage.completes();
      debug!(from = %state, to = %next, "pipeline advanced");
      state = next;
    }

    info!(platform = %config.platform(), dist = %layout.dist_dir.display(), "build complete");

    Ok(BuildOutput {
      platform: config.platform(),
      dist_dir: layout.dist_dir,
      shell_dir: layout.shell_dir,
      binary: layout.binary,
    })
  }

  async fn run_stage(&self, stage: Stage, config: &BuildConfig, layout: &DistLayout) -> Result<(), BuildError> {
    match stage {
      Stage::Scaffold => self.scaffold.create(config, &self.runner).await,
      Stage::PackageShell => self
        .runner
        .run(&commands::packager(config))
        .await
        .map_err(BuildError::process(stage)),
      Stage::MergeShell => merge_shell(layout).map_err(BuildError::filesystem(stage)),
      Stage::PlaceBackend => {
        self
          .runner
          .run(&commands::backend(config))
          .await
          .map_err(BuildError::process(stage))?;
        stager::place_file(&layout.built_binary, &layout.binary).map_err(BuildError::filesystem(stage))
      }
      Stage::Cleanup => cleanup(config).map_err(BuildError::filesystem(stage)),
    }
  }
}

fn merge_shell(layout: &DistLayout) -> Result<(), stager::FsError> {
  stager::merge_tree(&layout.packaged_dir, &layout.shell_dir)?;
  stager::remove_dir_if_exists(&layout.packager_out)
}

/// Remove the staging directory, unless asked to keep it or the web
/// application itself lives inside it.
fn cleanup(config: &BuildConfig) -> Result<(), stager::FsError> {
  let staging = config.staging_dir();
  if config.keep_staging {
    debug!(staging = %staging.display(), "keeping staging directory");
    return Ok(());
  }
  let canonical = dunce::canonicalize(&staging).unwrap_or_else(|_| staging.clone());
  if config.app_dir.starts_with(&canonical) {
    info!(staging = %staging.display(), "web application lives in staging, keeping it");
    return Ok(());
  }
  stager::remove_dir_if_exists(&staging)
}
