//! Fixed names shared by the pipeline stages.

pub const APP_NAME: &str = "shellpack";

/// Staging directory, relative to the working directory of a run.
pub const STAGING_DIR_NAME: &str = ".shellpack";

/// Where the frontend packager writes its output, relative to the staging directory.
pub const PACKAGER_OUT_DIR: &str = "dist";

/// Subfolder of a distribution folder that receives the packaged shell.
pub const SHELL_DIR_NAME: &str = "electronjs";

/// Subfolder of the staging directory that receives the web application.
pub const ASSETS_DIR_NAME: &str = "assets";

/// Version stamped into every packaged shell.
pub const SHELL_APP_VERSION: &str = "1.0.0";

/// Paths the packager must leave out of the shipped archive.
pub const PACKAGER_IGNORE: &str = r#"--ignore=\"(dist|docs|.gitignore|LICENSE|README.md|webpack.config*)\""#;

/// Build tag selecting the packaged-build code path in the backend.
pub const BACKEND_BUILD_TAG: &str = "shellpack";

/// Default packager location, relative to the staging directory.
pub const DEFAULT_PACKAGER: &str = "node_modules/.bin/electron-packager";

pub const DEFAULT_BACKEND_COMPILER: &str = "go";
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";
pub const DEFAULT_FRONTEND_BUILDER: &str = "polymer";

/// Environment variables overriding the external toolchain.
pub const ENV_BACKEND_COMPILER: &str = "SHELLPACK_GO";
pub const ENV_PACKAGE_MANAGER: &str = "SHELLPACK_NPM";
pub const ENV_FRONTEND_BUILDER: &str = "SHELLPACK_POLYMER";
pub const ENV_PACKAGER: &str = "SHELLPACK_PACKAGER";
