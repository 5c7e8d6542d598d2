//! Library-level tests driving the pipeline through its public seams.

mod pipeline_tests;
