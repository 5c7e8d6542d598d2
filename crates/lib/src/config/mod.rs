//! Build configuration.
//!
//! A [`BuildRequest`] is the raw external input (flag values, possibly
//! relative paths). Resolving it yields the immutable [`BuildConfig`] that is
//! handed by reference through every pipeline stage.

mod toolchain;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::STAGING_DIR_NAME;
use crate::platform::{Arch, Platform, Target};

pub use toolchain::Toolchain;

/// Errors raised while turning external input into a usable configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("unknown build target: {0}")]
  UnknownTarget(String),

  #[error("unknown build architecture: {0}")]
  UnknownArch(String),

  #[error("only one target platform is allowed at a time, got: {}", join(.0))]
  ConflictingTargets(Vec<Target>),

  #[error("only one target architecture is allowed at a time, got: {}", join(.0))]
  ConflictingArchs(Vec<Arch>),

  #[error("no target platform given and host OS {0} is not a supported target")]
  UnsupportedHost(String),

  #[error("application name must not be empty")]
  EmptyName,

  #[error("given application directory {} does not exist", .0.display())]
  MissingAppDir(PathBuf),

  #[error("failed to read application directory {}: {source}", path.display())]
  UnreadableAppDir { path: PathBuf, source: std::io::Error },

  #[error("given application directory {} is empty", .0.display())]
  EmptyAppDir(PathBuf),

  #[error("backend entry {} is not a directory", .0.display())]
  MissingBackendEntry(PathBuf),

  #[error("index.htm(l) missing in {}", .0.display())]
  MissingIndex(PathBuf),
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
  items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

/// Raw build input, as collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
  pub name: String,
  pub backend_entry: PathBuf,
  pub app_dir: PathBuf,
  pub output_dir: PathBuf,
  /// Requested target names or aliases. Empty means the host OS.
  pub targets: Vec<String>,
  /// Requested architectures. Empty means x64.
  pub archs: Vec<String>,
  pub polymer_build: bool,
  pub no_prune: bool,
  pub keep_staging: bool,
}

impl BuildRequest {
  /// Resolve the request against a working directory.
  ///
  /// Aliases naming the same target collapse into one selection. More than one
  /// distinct target or architecture is rejected, never silently resolved.
  pub fn resolve(self, work_dir: &Path, toolchain: Toolchain) -> Result<BuildConfig, ValidationError> {
    if self.name.trim().is_empty() {
      return Err(ValidationError::EmptyName);
    }

    let targets = self
      .targets
      .iter()
      .map(|t| t.parse::<Target>())
      .collect::<Result<Vec<_>, _>>()?;
    let target = match select_one(targets).map_err(ValidationError::ConflictingTargets)? {
      Some(target) => target,
      None => Target::current().ok_or_else(|| ValidationError::UnsupportedHost(std::env::consts::OS.to_string()))?,
    };

    let archs = self
      .archs
      .iter()
      .map(|a| a.parse::<Arch>())
      .collect::<Result<Vec<_>, _>>()?;
    let arch = select_one(archs)
      .map_err(ValidationError::ConflictingArchs)?
      .unwrap_or_default();

    let config = BuildConfig {
      name: self.name,
      backend_entry: absolutize(work_dir, &self.backend_entry),
      app_dir: absolutize(work_dir, &self.app_dir),
      output_dir: absolutize(work_dir, &self.output_dir),
      target,
      arch,
      polymer_build: self.polymer_build,
      no_prune: self.no_prune,
      work_dir: work_dir.to_path_buf(),
      keep_staging: self.keep_staging,
      toolchain,
    };
    debug!(?config, "resolved build configuration");
    Ok(config)
  }
}

/// Deduplicate selections, keeping order. Returns the conflicting set if more
/// than one distinct value remains.
fn select_one<T: PartialEq + Copy>(values: Vec<T>) -> Result<Option<T>, Vec<T>> {
  let mut distinct: Vec<T> = Vec::new();
  for value in values {
    if !distinct.contains(&value) {
      distinct.push(value);
    }
  }
  match distinct.len() {
    0 => Ok(None),
    1 => Ok(Some(distinct[0])),
    _ => Err(distinct),
  }
}

fn absolutize(work_dir: &Path, path: &Path) -> PathBuf {
  let joined = if path.is_absolute() {
    path.to_path_buf()
  } else {
    work_dir.join(path)
  };
  dunce::canonicalize(&joined).unwrap_or(joined)
}

/// Validated configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
  /// Used in the distribution folder name.
  pub name: String,
  /// Directory containing the backend program's entry point.
  pub backend_entry: PathBuf,
  /// Rendering-shell sources (the web application).
  pub app_dir: PathBuf,
  /// Where distribution folders are written.
  pub output_dir: PathBuf,
  pub target: Target,
  pub arch: Arch,
  /// Run the frontend build tool before staging the web application.
  pub polymer_build: bool,
  /// Pass `--no-prune` to the packager.
  pub no_prune: bool,
  /// Directory holding the staging area.
  pub work_dir: PathBuf,
  /// Leave the staging directory in place after a successful run.
  pub keep_staging: bool,
  pub toolchain: Toolchain,
}

impl BuildConfig {
  pub fn platform(&self) -> Platform {
    Platform::new(self.target, self.arch)
  }

  pub fn staging_dir(&self) -> PathBuf {
    self.work_dir.join(STAGING_DIR_NAME)
  }

  /// Check the filesystem preconditions of a run.
  ///
  /// The application directory must exist and be non-empty, and the backend
  /// entry must be a directory.
  pub fn validate(&self) -> Result<(), ValidationError> {
    if !self.app_dir.is_dir() {
      return Err(ValidationError::MissingAppDir(self.app_dir.clone()));
    }
    let mut entries = fs::read_dir(&self.app_dir).map_err(|e| ValidationError::UnreadableAppDir {
      path: self.app_dir.clone(),
      source: e,
    })?;
    if entries.next().is_none() {
      return Err(ValidationError::EmptyAppDir(self.app_dir.clone()));
    }
    if !self.backend_entry.is_dir() {
      return Err(ValidationError::MissingBackendEntry(self.backend_entry.clone()));
    }
    Ok(())
  }
}
