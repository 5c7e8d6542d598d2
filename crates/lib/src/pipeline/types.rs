//! Pipeline states, stages, errors and results.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::ValidationError;
use crate::platform::Platform;
use crate::process::ProcessError;
use crate::stager::FsError;

/// Progress of one pipeline run.
///
/// `Failed` is reachable from every state and absorbs the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
  Init,
  StagingReady,
  ShellPackaged,
  Merged,
  BackendPlaced,
  Done,
  Failed,
}

impl PipelineState {
  /// The stage that moves the pipeline out of this state, if any.
  pub fn next_stage(self) -> Option<Stage> {
    match self {
      Self::Init => Some(Stage::Scaffold),
      Self::StagingReady => Some(Stage::PackageShell),
      Self::ShellPackaged => Some(Stage::MergeShell),
      Self::Merged => Some(Stage::PlaceBackend),
      Self::BackendPlaced => Some(Stage::Cleanup),
      Self::Done | Self::Failed => None,
    }
  }
}

impl fmt::Display for PipelineState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Init => "init",
      Self::StagingReady => "staging-ready",
      Self::ShellPackaged => "shell-packaged",
      Self::Merged => "merged",
      Self::BackendPlaced => "backend-placed",
      Self::Done => "done",
      Self::Failed => "failed",
    };
    f.write_str(name)
  }
}

/// One transition of the pipeline, executed in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
  /// Materialize the rendering shell in the staging directory.
  Scaffold,
  /// Run the frontend packager against the staging directory.
  PackageShell,
  /// Move the packaged shell into the distribution folder.
  MergeShell,
  /// Cross-compile the backend and place its binary.
  PlaceBackend,
  /// Remove the staging directory.
  Cleanup,
}

impl Stage {
  /// Every stage, in execution order.
  pub const ALL: [Stage; 5] = [
    Stage::Scaffold,
    Stage::PackageShell,
    Stage::MergeShell,
    Stage::PlaceBackend,
    Stage::Cleanup,
  ];

  /// State reached when this stage succeeds.
  pub fn completes(self) -> PipelineState {
    match self {
      Self::Scaffold => PipelineState::StagingReady,
      Self::PackageShell => PipelineState::ShellPackaged,
      Self::MergeShell => PipelineState::Merged,
      Self::PlaceBackend => PipelineState::BackendPlaced,
      Self::Cleanup => PipelineState::Done,
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      Self::Scaffold => "create staging structure",
      Self::PackageShell => "package rendering shell",
      Self::MergeShell => "merge packaged shell",
      Self::PlaceBackend => "build and place backend",
      Self::Cleanup => "remove staging directory",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.description())
  }
}

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("invalid build configuration: {0}")]
  Validation(#[from] ValidationError),

  #[error("{stage} failed: {source}")]
  Rejected { stage: Stage, source: ValidationError },

  #[error("{stage} failed: {source}")]
  Process { stage: Stage, source: ProcessError },

  #[error("{stage} failed: {source}")]
  Filesystem { stage: Stage, source: FsError },
}

impl BuildError {
  /// Input found unusable while a stage was already running.
  pub fn rejected(stage: Stage) -> impl FnOnce(ValidationError) -> Self {
    move |source| Self::Rejected { stage, source }
  }

  pub fn process(stage: Stage) -> impl FnOnce(ProcessError) -> Self {
    move |source| Self::Process { stage, source }
  }

  pub fn filesystem(stage: Stage) -> impl FnOnce(FsError) -> Self {
    move |source| Self::Filesystem { stage, source }
  }

  /// The stage that failed, if the error came from one.
  pub fn stage(&self) -> Option<Stage> {
    match self {
      Self::Validation(_) => None,
      Self::Rejected { stage, .. } | Self::Process { stage, .. } | Self::Filesystem { stage, .. } => Some(*stage),
    }
  }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutput {
  pub platform: Platform,
  pub dist_dir: PathBuf,
  pub shell_dir: PathBuf,
  pub binary: PathBuf,
}
