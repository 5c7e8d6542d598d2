use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;

use shellpack_lib::consts::PACKAGER_OUT_DIR;
use shellpack_lib::{
  Arch, BuildConfig, BuildError, BuildRequest, Invocation, Pipeline, ProcessError, Reporter, Runner, Scaffold, Stage,
  Target, Toolchain,
};

/// Emulates the packager and compiler by writing the files they would produce.
#[derive(Default)]
struct FakeTools {
  seen: Mutex<Vec<Invocation>>,
  fail_compiler: bool,
}

impl Runner for FakeTools {
  async fn run(&self, invocation: &Invocation) -> Result<(), ProcessError> {
    self.seen.lock().unwrap().push(invocation.clone());
    let io = |e: std::io::Error| ProcessError::Spawn {
      program: invocation.program_name(),
      work_dir: invocation.work_dir.clone(),
      source: e,
    };

    match invocation.program_name().as_str() {
      "electron-packager" => {
        let platform = invocation
          .args
          .iter()
          .find_map(|a| a.strip_prefix("--platform="))
          .unwrap_or_default();
        let arch = invocation.args[3].trim_start_matches("--");
        let folder = format!("{}-{}-{}", invocation.args[1], platform, arch);
        let out = invocation.work_dir.join(PACKAGER_OUT_DIR).join(folder);
        fs::create_dir_all(&out).map_err(io)?;
        fs::write(out.join("shell"), "shell").map_err(io)
      }
      "go" if self.fail_compiler => Err(ProcessError::Exit {
        program: "go".to_string(),
        code: Some(2),
      }),
      "go" => {
        let name = invocation.work_dir.file_name().unwrap().to_string_lossy().into_owned();
        fs::write(invocation.work_dir.join(name), "bin").map_err(io)
      }
      _ => Ok(()),
    }
  }
}

/// Stages only the web application, without installing anything.
struct AssetsOnly;

impl Scaffold for AssetsOnly {
  async fn create<R: Runner>(&self, config: &BuildConfig, _runner: &R) -> Result<(), BuildError> {
    let assets = config.staging_dir().join("assets");
    fs::create_dir_all(&assets).unwrap();
    fs::copy(config.app_dir.join("index.html"), assets.join("index.html")).unwrap();
    Ok(())
  }
}

#[derive(Clone, Default)]
struct StageLog(Arc<Mutex<Vec<String>>>);

impl Reporter for StageLog {
  fn stage_started(&self, stage: Stage) {
    self.0.lock().unwrap().push(format!("start {stage:?}"));
  }

  fn stage_finished(&self, stage: Stage, _elapsed: Duration) {
    self.0.lock().unwrap().push(format!("done {stage:?}"));
  }

  fn stage_failed(&self, stage: Stage, _error: &BuildError) {
    self.0.lock().unwrap().push(format!("fail {stage:?}"));
  }
}

fn project(root: &Path, target: &str, arch: &str) -> BuildConfig {
  fs::create_dir_all(root.join("web")).unwrap();
  fs::write(root.join("web/index.html"), "<html></html>").unwrap();
  fs::create_dir_all(root.join("api")).unwrap();

  BuildRequest {
    name: "app".to_string(),
    backend_entry: "api".into(),
    app_dir: "web".into(),
    output_dir: "release".into(),
    targets: vec![target.to_string()],
    archs: vec![arch.to_string()],
    ..Default::default()
  }
  .resolve(root, Toolchain::default())
  .unwrap()
}

#[tokio::test]
async fn custom_collaborators_drive_every_stage() {
  let temp = TempDir::new().unwrap();
  let config = project(temp.path(), "linux", "armv7l");
  let log = StageLog::default();
  let tools = FakeTools::default();

  let output = Pipeline::new(&tools, AssetsOnly, Box::new(log.clone()))
    .run(&config)
    .await
    .unwrap();

  assert_eq!(output.platform.target, Target::Linux);
  assert_eq!(output.platform.arch, Arch::Armv7l);
  assert_eq!(output.dist_dir, config.output_dir.join("app-darwin-armv7l"));
  assert!(output.shell_dir.join("shell").is_file());
  assert_eq!(fs::read_to_string(&output.binary).unwrap(), "bin");
  assert!(!config.staging_dir().exists());

  let events = log.0.lock().unwrap().clone();
  assert_eq!(events.first().map(String::as_str), Some("start Scaffold"));
  assert_eq!(events.last().map(String::as_str), Some("done Cleanup"));
  assert!(events.iter().all(|e| !e.starts_with("fail")));

  let seen = tools.seen.lock().unwrap();
  assert_eq!(seen.len(), 2);
  let env = &seen[1].env;
  assert!(env.contains(&("GOOS".to_string(), "linux".to_string())));
  assert!(env.contains(&("GOARCH".to_string(), "arm".to_string())));
  assert!(env.contains(&("GOARM".to_string(), "7".to_string())));
}

#[tokio::test]
async fn compiler_failure_leaves_shell_but_no_binary() {
  let temp = TempDir::new().unwrap();
  let config = project(temp.path(), "mac", "x64");
  let log = StageLog::default();
  let tools = FakeTools {
    fail_compiler: true,
    ..Default::default()
  };

  let err = Pipeline::new(&tools, AssetsOnly, Box::new(log.clone()))
    .run(&config)
    .await
    .unwrap_err();

  assert_eq!(err.stage(), Some(Stage::PlaceBackend));
  assert!(matches!(err, BuildError::Process { .. }));
  assert!(err.to_string().contains("exit code 2"));

  let dist = config.output_dir.join("app-darwin-x64");
  assert!(dist.join("electronjs/shell").is_file());
  assert!(!dist.join("api").exists());
  assert_eq!(log.0.lock().unwrap().last().map(String::as_str), Some("fail PlaceBackend"));
}
