//! harness-input: read test harness input files
//!
//! Parses the line-oriented `rgt.input` file into tests, lifecycle tasks and
//! the path to tests, optionally folding an INI master config into a
//! namespaced environment map first.

pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod utils;

pub use config::{ConfigMerger, EnvMap};
pub use domain::{Directive, ParseWarning, TaskRecord, TestRecord, UNBOUNDED_ITERATIONS};
pub use error::{ConfigError, InputError, InterpolationError, LoadError};
pub use input::{HarnessInput, InputFileParser, LoadOptions, ParsedInput};
