//! Paths of one build, derived from the configuration.
//!
//! ```text
//! <output>/<name>-<platformToken>-<arch>/electronjs/...   packaged shell
//! <output>/<name>-<platformToken>-<arch>/<binary>[.exe]   backend
//! ```

use std::path::PathBuf;

use crate::config::BuildConfig;
use crate::consts::{PACKAGER_OUT_DIR, SHELL_DIR_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistLayout {
  /// `<name>-<platformToken>-<arch>`
  pub dist_folder: String,
  /// Final distribution folder under the output directory.
  pub dist_dir: PathBuf,
  /// Where the packaged shell ends up.
  pub shell_dir: PathBuf,
  /// Root of everything the packager writes inside the staging directory.
  pub packager_out: PathBuf,
  /// The packager's folder for this platform.
  pub packaged_dir: PathBuf,
  pub binary_name: String,
  /// Where the backend compiler leaves the binary.
  pub built_binary: PathBuf,
  /// Final location of the backend binary.
  pub binary: PathBuf,
}

impl DistLayout {
  pub fn new(config: &BuildConfig) -> Self {
    let platform = config.platform();
    let dist_folder = platform.dist_folder(&config.name);
    let dist_dir = config.output_dir.join(&dist_folder);
    let packager_out = config.staging_dir().join(PACKAGER_OUT_DIR);

    // The compiler names the binary after the entry directory.
    let entry_name = config
      .backend_entry
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| config.name.clone());
    let binary_name = platform.binary_name(&entry_name);

    Self {
      shell_dir: dist_dir.join(SHELL_DIR_NAME),
      packaged_dir: packager_out.join(&dist_folder),
      packager_out,
      built_binary: config.backend_entry.join(&binary_name),
      binary: dist_dir.join(&binary_name),
      binary_name,
      dist_dir,
      dist_folder,
    }
  }
}
