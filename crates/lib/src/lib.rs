//! shellpack-lib: build-and-release pipeline for hybrid desktop applications
//!
//! A hybrid application is a compiled backend paired with a bundled
//! web-rendering shell. This crate turns one into a platform- and
//! architecture-specific distributable:
//! - `platform`: target/architecture resolution and naming tables
//! - `process`: external program execution
//! - `stager`: moving staged artifacts into the output tree
//! - `scaffold`: building the rendering shell's staging structure
//! - `pipeline`: the stage sequencing that ties it all together

pub mod config;
pub mod consts;
pub mod pipeline;
pub mod platform;
pub mod process;
pub mod scaffold;
pub mod stager;


pub use config::{BuildConfig, BuildRequest, Toolchain, ValidationError};
pub use pipeline::{BuildError, BuildOutput, Pipeline, Reporter, Stage, TracingReporter};
pub use platform::{Arch, Platform, Target};
pub use process::{Invocation, ProcessError, Runner, SystemRunner};
pub use scaffold::{Scaffold, ShellScaffold};

/// Pipeline driving real external tools.
pub fn system_pipeline(reporter: Box<dyn Reporter>) -> Pipeline<SystemRunner, ShellScaffold> {
  Pipeline::new(SystemRunner, ShellScaffold, reporter)
}
