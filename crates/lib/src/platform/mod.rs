//! Target platform model.
//!
//! A [`Platform`] is the single (target, architecture) pair a build produces.
//! Every name that depends on it (distribution folder, packager flags,
//! backend cross-compilation environment) is derived here from enum-keyed
//! tables so the mappings can be checked in isolation.

pub mod arch;
pub mod target;

use std::fmt;

use serde::Serialize;

pub use arch::Arch;
pub use target::Target;

/// Target operating system and architecture of one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Platform {
  pub target: Target,
  pub arch: Arch,
}

impl Platform {
  pub fn new(target: Target, arch: Arch) -> Self {
    Self { target, arch }
  }

  /// Name of the distribution folder: `<name>-<platformToken>-<arch>`.
  ///
  /// This is also the folder name the frontend packager writes, so it must
  /// match the packager's own naming exactly.
  pub fn dist_folder(&self, name: &str) -> String {
    format!("{}-{}-{}", name, self.target.platform_token(), self.arch)
  }

  /// File name of the backend binary produced from an entry directory name.
  pub fn binary_name(&self, entry_name: &str) -> String {
    format!("{}{}", entry_name, self.target.exe_suffix())
  }

  /// Environment overrides for the backend cross-compilation.
  pub fn backend_env(&self) -> Vec<(String, String)> {
    let mut env = vec![("GOOS".to_string(), self.target.backend_os().to_string())];
    env.extend(
      self
        .arch
        .backend_env()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string())),
    );
    env
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.target, self.arch)
  }
}
