//! End-to-end builds against scripted stand-ins for npm, the packager and go.

#![cfg(unix)]

mod build_tests;
mod common;
