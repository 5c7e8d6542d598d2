use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::ValidationError;

/// Operating systems a distributable can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
  Win,
  Linux,
  Mac,
}

impl Target {
  /// Resolve a requested target name or alias.
  ///
  /// Aliases are case-sensitive: `win`, `windows` and `win32` select Windows,
  /// `darwin` and `mac` select macOS, `linux` selects Linux.
  pub fn resolve(requested: &str) -> Result<Self, ValidationError> {
    match requested {
      "win" | "windows" | "win32" => Ok(Self::Win),
      "linux" => Ok(Self::Linux),
      "darwin" | "mac" => Ok(Self::Mac),
      other => Err(ValidationError::UnknownTarget(other.to_string())),
    }
  }

  /// Detect the host operating system.
  ///
  /// Returns `None` if the host is not a supported target.
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "windows" => Some(Self::Win),
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::Mac),
      _ => None,
    }
  }

  /// Canonical short name.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Win => "win",
      Self::Linux => "linux",
      Self::Mac => "mac",
    }
  }

  /// Platform token used by the frontend packager in its output folder names.
  ///
  /// Linux shares the `darwin` token because the packager is invoked with the
  /// darwin platform flag for it (see [`Target::packager_platform`]).
  pub fn platform_token(&self) -> &'static str {
    match self {
      Self::Win => "win32",
      Self::Linux | Self::Mac => "darwin",
    }
  }

  /// `--platform` value handed to the frontend packager.
  // NOTE: linux maps to darwin. Kept as observed; pinned by tests below.
  pub fn packager_platform(&self) -> &'static str {
    match self {
      Self::Win => "win32",
      Self::Linux => "darwin",
      Self::Mac => "darwin",
    }
  }

  /// `GOOS` value for the backend cross-compilation.
  pub fn backend_os(&self) -> &'static str {
    match self {
      Self::Win => "windows",
      Self::Linux => "linux",
      Self::Mac => "darwin",
    }
  }

  /// Linker flags for the backend build. Windows builds drop the console window.
  pub fn backend_ldflags(&self) -> Option<&'static str> {
    match self {
      Self::Win => Some("-H=windowsgui"),
      Self::Linux | Self::Mac => None,
    }
  }

  /// Suffix appended to the backend binary name.
  pub fn exe_suffix(&self) -> &'static str {
    match self {
      Self::Win => ".exe",
      Self::Linux | Self::Mac => "",
    }
  }
}

impl FromStr for Target {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::resolve(s)
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
