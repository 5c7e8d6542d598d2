//! Process Runner.
//!
//! Launches an external program in a working directory with environment
//! overrides, passing its stdout/stderr straight through to ours, and waits for
//! it to exit. There is no retry and no timeout: a failed program fails the
//! calling stage, a hung program hangs the pipeline.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Errors from running an external program.
#[derive(Debug, Error)]
pub enum ProcessError {
  #[error("failed to start {program} in {}: {source}", work_dir.display())]
  Spawn {
    program: String,
    work_dir: PathBuf,
    source: std::io::Error,
  },

  #[error("failed waiting for {program} to finish: {source}")]
  Wait { program: String, source: std::io::Error },

  #[error("{program} exited with {}", describe_code(*code))]
  Exit { program: String, code: Option<i32> },
}

fn describe_code(code: Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {}", code),
    None => "no exit code (terminated by signal)".to_string(),
  }
}

/// One external program call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub work_dir: PathBuf,
  pub program: PathBuf,
  /// Added on top of the current process environment.
  pub env: Vec<(String, String)>,
  pub args: Vec<String>,
}

impl Invocation {
  pub fn new(work_dir: impl Into<PathBuf>, program: impl Into<PathBuf>) -> Self {
    Self {
      work_dir: work_dir.into(),
      program: program.into(),
      env: Vec::new(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.push((key.into(), value.into()));
    self
  }

  pub fn envs(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
    self.env.extend(vars);
    self
  }

  /// File name of the program, for error messages and matching.
  pub fn program_name(&self) -> String {
    program_name(&self.program)
  }
}

fn program_name(program: &Path) -> String {
  program
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| program.display().to_string())
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (key, value) in &self.env {
      write!(f, "{}={} ", key, value)?;
    }
    write!(f, "{}", self.program.display())?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Runs external programs to completion.
pub trait Runner {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<(), ProcessError>>;
}

impl<R: Runner> Runner for &R {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<(), ProcessError>> {
    (**self).run(invocation)
  }
}

/// Runs programs as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
  async fn run(&self, invocation: &Invocation) -> Result<(), ProcessError> {
    info!(cmd = %invocation, dir = %invocation.work_dir.display(), "running");

    let mut command = Command::new(&invocation.program);
    command
      .args(&invocation.args)
      .current_dir(&invocation.work_dir)
      .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
      .stdin(Stdio::null())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit());

    let mut child = command.spawn().map_err(|e| ProcessError::Spawn {
      program: invocation.program_name(),
      work_dir: invocation.work_dir.clone(),
      source: e,
    })?;

    let status = child.wait().await.map_err(|e| ProcessError::Wait {
      program: invocation.program_name(),
      source: e,
    })?;

    debug!(program = %invocation.program_name(), ?status, "process exited");

    if !status.success() {
      return Err(ProcessError::Exit {
        program: invocation.program_name(),
        code: status.code(),
      });
    }

    Ok(())
  }
}
