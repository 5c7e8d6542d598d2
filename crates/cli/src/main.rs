use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shellpack_lib::consts::APP_NAME;
use shellpack_lib::{BuildRequest, Toolchain};

mod cmd;
mod output;
mod reporter;

use output::OutputFormat;

/// shellpack - package a backend and its web-rendering shell into a distributable
#[derive(Parser)]
#[command(name = "shellpack")]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Cli {
  /// App name
  #[arg(short, long, default_value = "shellpack-app")]
  name: String,

  /// Backend entrypoint, must point to a directory containing the backend's main package
  #[arg(short = 'g', long = "go", default_value = ".")]
  backend: PathBuf,

  /// Application directory, must point to a directory containing a webapp starting at index.html
  #[arg(short, long, default_value = ".shellpack/assets/")]
  app: PathBuf,

  /// Output directory. Each build is placed in <name>-<platform>-<arch> inside it
  #[arg(long, default_value = ".")]
  out: PathBuf,

  /// Print the shellpack version
  #[arg(short = 'v', long)]
  version: bool,

  /// Run the polymer build on the application directory first
  #[arg(long)]
  polymer: bool,

  /// Pass --no-prune to the frontend packager
  #[arg(long)]
  no_prune: bool,

  /// Keep the staging directory after a successful build
  #[arg(long)]
  keep_staging: bool,

  /// Build for macOS
  #[arg(short, long)]
  mac: bool,

  /// Build for macOS
  #[arg(short = 'o', long)]
  macos: bool,

  /// Build for Linux
  #[arg(short, long)]
  linux: bool,

  /// Build for Windows
  #[arg(short, long)]
  win: bool,

  /// Build for Windows
  #[arg(long)]
  windows: bool,

  /// Build for x64
  #[arg(long)]
  x64: bool,

  /// Build for ia32
  #[arg(long)]
  ia32: bool,

  /// Build for armv7l
  #[arg(long)]
  armv7l: bool,

  /// Build for arm64
  #[arg(long)]
  arm64: bool,

  /// Result format
  #[arg(long, value_enum, default_value_t)]
  format: OutputFormat,

  /// Enable verbose logging
  #[arg(long)]
  verbose: bool,
}

impl Cli {
  /// Collect the selected platform and architecture flags as resolver input.
  fn into_request(self) -> BuildRequest {
    let platforms = [
      (self.mac, "mac"),
      (self.macos, "mac"),
      (self.linux, "linux"),
      (self.win, "win"),
      (self.windows, "win"),
    ];
    let archs = [
      (self.x64, "x64"),
      (self.ia32, "ia32"),
      (self.armv7l, "armv7l"),
      (self.arm64, "arm64"),
    ];

    BuildRequest {
      targets: selected(&platforms),
      archs: selected(&archs),
      name: self.name,
      backend_entry: self.backend,
      app_dir: self.app,
      output_dir: self.out,
      polymer_build: self.polymer,
      no_prune: self.no_prune,
      keep_staging: self.keep_staging,
    }
  }
}

fn selected(flags: &[(bool, &str)]) -> Vec<String> {
  flags
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| name.to_string())
    .collect()
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.version {
    println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
    return Ok(());
  }

  // Initialize logging
  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let format = cli.format;
  let work_dir = std::env::current_dir().context("Failed to determine working directory")?;
  let config = cli
    .into_request()
    .resolve(&work_dir, Toolchain::from_env())
    .context("Bad input parameters")?;

  cmd::cmd_build(&config, format)
}
