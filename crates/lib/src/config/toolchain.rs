use std::env;
use std::path::{Path, PathBuf};

use crate::consts::{
  DEFAULT_BACKEND_COMPILER, DEFAULT_FRONTEND_BUILDER, DEFAULT_PACKAGE_MANAGER, DEFAULT_PACKAGER, ENV_BACKEND_COMPILER,
  ENV_FRONTEND_BUILDER, ENV_PACKAGE_MANAGER, ENV_PACKAGER,
};

/// External programs the pipeline drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  /// Backend cross-compiler (`go`).
  pub backend_compiler: PathBuf,
  /// Package manager installing the shell's dependencies (`npm`).
  pub package_manager: PathBuf,
  /// Optional frontend build tool (`polymer`).
  pub frontend_builder: PathBuf,
  /// Frontend packager. Relative paths are resolved against the staging directory.
  pub packager: PathBuf,
}

impl Default for Toolchain {
  fn default() -> Self {
    Self {
      backend_compiler: PathBuf::from(DEFAULT_BACKEND_COMPILER),
      package_manager: PathBuf::from(DEFAULT_PACKAGE_MANAGER),
      frontend_builder: PathBuf::from(DEFAULT_FRONTEND_BUILDER),
      packager: PathBuf::from(DEFAULT_PACKAGER),
    }
  }
}

impl Toolchain {
  /// Defaults, with each program overridable through its `SHELLPACK_*` variable.
  pub fn from_env() -> Self {
    let defaults = Self::default();
    Self {
      backend_compiler: env_path(ENV_BACKEND_COMPILER).unwrap_or(defaults.backend_compiler),
      package_manager: env_path(ENV_PACKAGE_MANAGER).unwrap_or(defaults.package_manager),
      frontend_builder: env_path(ENV_FRONTEND_BUILDER).unwrap_or(defaults.frontend_builder),
      packager: env_path(ENV_PACKAGER).unwrap_or(defaults.packager),
    }
  }

  /// Absolute location of the packager for a given staging directory.
  pub fn packager_path(&self, staging_dir: &Path) -> PathBuf {
    if self.packager.is_absolute() {
      self.packager.clone()
    } else {
      staging_dir.join(&self.packager)
    }
  }
}

fn env_path(var: &str) -> Option<PathBuf> {
  env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}
