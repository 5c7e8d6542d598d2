//! Shared test helpers for CLI integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Installs `node_modules` the way a real `npm install` would.
pub const FAKE_NPM: &str = r#"#!/bin/sh
mkdir -p node_modules
"#;

/// Writes `dist/<name>-<platform>-<arch>` like electron-packager, recording
/// its arguments in `resources/args.txt`.
pub const FAKE_PACKAGER: &str = r#"#!/bin/sh
name="$2"
platform=""
arch=""
for a in "$@"; do
  case "$a" in
    --platform=*) platform="${a#--platform=}" ;;
    --x64|--ia32|--armv7l|--arm64) arch="${a#--}" ;;
  esac
done
out="dist/$name-$platform-$arch"
mkdir -p "$out/resources"
printf 'shell' > "$out/shell"
printf '%s\n' "$@" > "$out/resources/args.txt"
"#;

/// Builds a "binary" named after the working directory whose content is the
/// target it was compiled for.
pub const FAKE_GO: &str = r#"#!/bin/sh
name="$(basename "$(pwd -P)")"
if [ "$GOOS" = "windows" ]; then name="$name.exe"; fi
printf '%s/%s/%s' "$GOOS" "$GOARCH" "$GOARM" > "$name"
"#;

pub const FAILING_TOOL: &str = r#"#!/bin/sh
echo "tool exploded" >&2
exit 7
"#;

/// Isolated project directory with a web app, a backend and fake tools.
pub struct TestEnv {
  pub temp: TempDir,
  packager: PathBuf,
  go: PathBuf,
  npm: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "ui/index.html", "<html></html>");
    write(root, "ui/js/app.js", "console.log('hi')");
    write(root, "server/main.go", "package main");

    let env = Self {
      packager: root.join("tools/electron-packager"),
      go: root.join("tools/go"),
      npm: root.join("tools/npm"),
      temp,
    };
    env.set_tool(&env.packager, FAKE_PACKAGER);
    env.set_tool(&env.go, FAKE_GO);
    env.set_tool(&env.npm, FAKE_NPM);
    env
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  pub fn fail_packager(&self) {
    self.set_tool(&self.packager, FAILING_TOOL);
  }

  pub fn read(&self, relative: &str) -> String {
    fs::read_to_string(self.root().join(relative)).unwrap()
  }

  fn set_tool(&self, path: &Path, script: &str) {
    write(self.root(), path.strip_prefix(self.root()).unwrap().to_str().unwrap(), script);
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
  }

  /// Command running in the project directory with the fake toolchain.
  pub fn shellpack_cmd(&self) -> Command {
    self.shellpack_cmd_for_app("ui")
  }

  pub fn shellpack_cmd_for_app(&self, app: &str) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("shellpack");
    cmd.current_dir(self.root());
    cmd.env("SHELLPACK_PACKAGER", &self.packager);
    cmd.env("SHELLPACK_GO", &self.go);
    cmd.env("SHELLPACK_NPM", &self.npm);
    cmd.args(["-n", "demo", "-g", "server", "-a", app, "--out", "out"]);
    cmd
  }
}

fn write(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(&path, content).unwrap();
}
