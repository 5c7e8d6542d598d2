//! Staging-structure creation.
//!
//! Before the packager can run, the staging directory must hold a complete
//! rendering shell: the shell template, its installed dependencies and the
//! web application under `assets/`. [`ShellScaffold`] builds that structure
//! using external tools through the [`Runner`].

mod templates;

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{BuildConfig, ValidationError};
use crate::consts::ASSETS_DIR_NAME;
use crate::pipeline::{BuildError, Stage};
use crate::process::{Invocation, Runner};
use crate::stager::{self, FsError};

pub use templates::{MAIN_JS_TEMPLATE, package_json};

const STAGE: Stage = Stage::Scaffold;

/// Arguments of the optional frontend build.
const FRONTEND_BUILD_ARGS: &[&str] = &[
  "build",
  "--name=es6-bundled",
  "--preset=es2016",
  "--js-transform-modules-to-amd",
  "--module-resolution=node",
  "--js-minify",
  "--css-minify",
  "--html-minify",
  "--bundle",
  "--add-service-worker",
  "--npm",
];

/// Materializes the rendering shell in the staging directory.
pub trait Scaffold {
  fn create<R: Runner>(&self, config: &BuildConfig, runner: &R) -> impl Future<Output = Result<(), BuildError>>;
}

/// Default scaffold: template files, `npm install`, then the web application.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellScaffold;

impl Scaffold for ShellScaffold {
  async fn create<R: Runner>(&self, config: &BuildConfig, runner: &R) -> Result<(), BuildError> {
    let staging = config.staging_dir();

    let ui_dir = if config.polymer_build {
      runner
        .run(&frontend_build(config))
        .await
        .map_err(BuildError::process(STAGE))?;
      config.app_dir.join("build").join("es6-bundled")
    } else {
      config.app_dir.clone()
    };

    fs::create_dir_all(&staging)
      .map_err(|e| FsError::CreateDir {
        path: staging.clone(),
        source: e,
      })
      .map_err(BuildError::filesystem(STAGE))?;

    write_template(config, &staging).map_err(BuildError::filesystem(STAGE))?;

    if staging.join("node_modules").is_dir() {
      debug!(staging = %staging.display(), "shell dependencies already installed");
    } else {
      info!(staging = %staging.display(), "installing shell dependencies");
      runner
        .run(&install(config, &staging))
        .await
        .map_err(BuildError::process(STAGE))?;
    }

    stage_web_app(&ui_dir, &staging)
  }
}

fn frontend_build(config: &BuildConfig) -> Invocation {
  Invocation::new(&config.app_dir, &config.toolchain.frontend_builder).args(FRONTEND_BUILD_ARGS.iter().copied())
}

fn install(config: &BuildConfig, staging: &Path) -> Invocation {
  Invocation::new(staging, &config.toolchain.package_manager).arg("install")
}

/// Write the shell template unless a previous run left one behind.
fn write_template(config: &BuildConfig, staging: &Path) -> Result<(), FsError> {
  let main_js = staging.join("main.js");
  if main_js.exists() {
    return Ok(());
  }
  stager::write_file(&staging.join("package.json"), &package_json(&config.name))?;
  stager::write_file(&main_js, MAIN_JS_TEMPLATE)
}

/// Copy the web application into the staging assets folder.
///
/// The application must contain an `index.html` or `index.htm`. When the
/// staging directory lives inside the application (`-a .`), it is left out of
/// the copy.
fn stage_web_app(ui_dir: &Path, staging: &Path) -> Result<(), BuildError> {
  if !(ui_dir.join("index.html").is_file() || ui_dir.join("index.htm").is_file()) {
    let missing = ValidationError::MissingIndex(ui_dir.to_path_buf());
    return Err(BuildError::rejected(STAGE)(missing));
  }

  let assets_dir = staging.join(ASSETS_DIR_NAME);
  if same_dir(ui_dir, &assets_dir) {
    debug!(dir = %ui_dir.display(), "web application already staged");
    return Ok(());
  }

  stager::merge_tree_excluding(ui_dir, &assets_dir, &[staging]).map_err(BuildError::filesystem(STAGE))
}

fn same_dir(a: &Path, b: &Path) -> bool {
  let canonical = |p: &Path| dunce::canonicalize(p).unwrap_or_else(|_| PathBuf::from(p));
  canonical(a) == canonical(b)
}
