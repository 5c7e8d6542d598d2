use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn mac_build_produces_distribution() {
  let env = TestEnv::new();

  env
    .shellpack_cmd()
    .arg("--mac")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete"));

  assert_eq!(env.read("out/demo-darwin-x64/electronjs/shell"), "shell");
  assert_eq!(env.read("out/demo-darwin-x64/server"), "darwin/amd64/");
  assert!(!env.root().join("server/server").exists());
  assert!(!env.root().join(".shellpack").exists());
}

#[test]
fn linux_arm64_keeps_observed_mappings() {
  let env = TestEnv::new();

  env.shellpack_cmd().args(["--linux", "--arm64"]).assert().success();

  let args = env.read("out/demo-darwin-arm64/electronjs/resources/args.txt");
  assert!(args.lines().any(|l| l == "--platform=darwin"));
  assert!(args.lines().any(|l| l == "--asar"));
  assert_eq!(env.read("out/demo-darwin-arm64/server"), "linux/arm/");
}

#[test]
fn windows_build_places_exe() {
  let env = TestEnv::new();

  env.shellpack_cmd().args(["--win", "--ia32"]).assert().success();

  assert_eq!(env.read("out/demo-win32-ia32/server.exe"), "windows/386/");
  assert!(!env.root().join("out/demo-win32-ia32/server").exists());
}

#[test]
fn armv7l_sets_arm_variant() {
  let env = TestEnv::new();

  env.shellpack_cmd().args(["--linux", "--armv7l"]).assert().success();

  assert_eq!(env.read("out/demo-darwin-armv7l/server"), "linux/arm/7");
}

#[test]
fn no_prune_is_forwarded() {
  let env = TestEnv::new();

  env.shellpack_cmd().args(["--mac", "--no-prune"]).assert().success();

  let args = env.read("out/demo-darwin-x64/electronjs/resources/args.txt");
  assert_eq!(args.lines().last(), Some("--no-prune"));
}

#[test]
fn packager_failure_aborts_before_backend() {
  let env = TestEnv::new();
  env.fail_packager();

  env
    .shellpack_cmd()
    .arg("--mac")
    .assert()
    .failure()
    .stderr(predicate::str::contains("tool exploded"))
    .stderr(predicate::str::contains("exit code 7"));

  assert!(!env.root().join("out/demo-darwin-x64").exists());
  assert!(!env.root().join("server/server").exists());
}

#[test]
fn json_format_prints_layout() {
  let env = TestEnv::new();

  let output = env
    .shellpack_cmd()
    .args(["--mac", "--format", "json"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(result["platform"]["target"], "mac");
  assert_eq!(result["platform"]["arch"], "x64");
  assert!(result["binary"].as_str().unwrap().ends_with("demo-darwin-x64/server"));
}

#[test]
fn rebuild_replaces_previous_output() {
  let env = TestEnv::new();
  env.shellpack_cmd().arg("--mac").assert().success();
  std::fs::write(env.root().join("out/demo-darwin-x64/electronjs/stale.txt"), "old").unwrap();

  env.shellpack_cmd().arg("--mac").assert().success();

  assert!(!env.root().join("out/demo-darwin-x64/electronjs/stale.txt").exists());
  assert_eq!(env.read("out/demo-darwin-x64/server"), "darwin/amd64/");
}

#[test]
fn keep_staging_leaves_shell_template() {
  let env = TestEnv::new();

  env.shellpack_cmd().args(["--mac", "--keep-staging"]).assert().success();

  assert!(env.root().join(".shellpack/main.js").exists());
  assert!(env.root().join(".shellpack/assets/js/app.js").exists());
  assert!(!env.root().join(".shellpack/dist").exists());
}

#[test]
fn project_root_as_app_dir_skips_staging() {
  let env = TestEnv::new();
  std::fs::write(env.root().join("index.html"), "<html>root</html>").unwrap();

  env
    .shellpack_cmd_for_app(".")
    .args(["--mac", "--keep-staging"])
    .assert()
    .success();

  assert_eq!(env.read(".shellpack/assets/index.html"), "<html>root</html>");
  assert!(env.root().join(".shellpack/assets/ui/index.html").exists());
  assert!(!env.root().join(".shellpack/assets/.shellpack").exists());
}
