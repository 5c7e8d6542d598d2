use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::ValidationError;

/// CPU architectures a distributable can be built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
  #[default]
  X64,
  Ia32,
  Armv7l,
  Arm64,
}

impl Arch {
  /// Resolve a requested architecture name.
  pub fn resolve(requested: &str) -> Result<Self, ValidationError> {
    match requested {
      "x64" => Ok(Self::X64),
      "ia32" => Ok(Self::Ia32),
      "armv7l" => Ok(Self::Armv7l),
      "arm64" => Ok(Self::Arm64),
      other => Err(ValidationError::UnknownArch(other.to_string())),
    }
  }

  /// Returns the name used by the frontend packager and in folder names
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X64 => "x64",
      Self::Ia32 => "ia32",
      Self::Armv7l => "armv7l",
      Self::Arm64 => "arm64",
    }
  }

  /// Architecture flag handed to the frontend packager (`--x64`, ...).
  pub fn packager_flag(&self) -> String {
    format!("--{}", self.as_str())
  }

  /// `GOARCH`/`GOARM` pairs for the backend cross-compilation.
  // NOTE: arm64 maps to plain `arm` with no GOARM. Kept as observed.
  pub fn backend_env(&self) -> &'static [(&'static str, &'static str)] {
    match self {
      Self::X64 => &[("GOARCH", "amd64")],
      Self::Ia32 => &[("GOARCH", "386")],
      Self::Armv7l => &[("GOARCH", "arm"), ("GOARM", "7")],
      Self::Arm64 => &[("GOARCH", "arm")],
    }
  }
}

impl FromStr for Arch {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::resolve(s)
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
