//! External program invocations of the packaging and backend stages.

use crate::config::BuildConfig;
use crate::consts::{BACKEND_BUILD_TAG, PACKAGER_IGNORE, PACKAGER_OUT_DIR, SHELL_APP_VERSION};
use crate::process::Invocation;

/// Arguments for the frontend packager.
pub fn packager_args(config: &BuildConfig) -> Vec<String> {
  let mut args = vec![
    ".".to_string(),
    config.name.clone(),
    format!("--platform={}", config.target.packager_platform()),
    config.arch.packager_flag(),
    "--asar".to_string(),
    format!("--out=./{}", PACKAGER_OUT_DIR),
    format!("--app-version={}", SHELL_APP_VERSION),
    PACKAGER_IGNORE.to_string(),
  ];
  if config.polymer_build || config.no_prune {
    args.push("--no-prune".to_string());
  }
  args
}

/// Frontend packager run inside the staging directory.
pub fn packager(config: &BuildConfig) -> Invocation {
  let staging = config.staging_dir();
  let program = config.toolchain.packager_path(&staging);
  Invocation::new(staging, program).args(packager_args(config))
}

/// Arguments for the backend compiler.
pub fn backend_args(config: &BuildConfig) -> Vec<String> {
  let mut args = vec!["build".to_string(), "-tags".to_string(), BACKEND_BUILD_TAG.to_string()];
  if let Some(ldflags) = config.target.backend_ldflags() {
    args.push("-ldflags".to_string());
    args.push(ldflags.to_string());
  }
  args
}

/// Backend cross-compilation run inside the backend entry directory.
pub fn backend(config: &BuildConfig) -> Invocation {
  Invocation::new(&config.backend_entry, &config.toolchain.backend_compiler)
    .args(backend_args(config))
    .envs(config.platform().backend_env())
}
