//! Harness input loading
//!
//! [`HarnessInput::load`] runs the optional master config merge, parses the
//! input file, and applies the task override when one is given.

use std::path::PathBuf;

use crate::config::{ConfigMerger, EnvMap};
use crate::domain::{ParseWarning, TaskRecord, TestRecord};
use crate::error::LoadError;

pub mod override_tasks;
pub mod parser;

pub use override_tasks::{task_name_for_token, translate_override};
pub use parser::{parse_str, InputFileParser, ParsedInput};

pub const DEFAULT_INPUT_FILE: &str = "rgt.input";
pub const DEFAULT_MASTER_CONFIG: &str = "master.ini";

/// What to load and which optional steps to run.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub input_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub task_override: Option<String>,
}

impl LoadOptions {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self { input_path: input_path.into(), config_path: None, task_override: None }
    }

    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn task_override(mut self, tokens: impl Into<String>) -> Self {
        self.task_override = Some(tokens.into());
        self
    }
}

/// Parsed harness input plus the environment merged from the master config.
#[derive(Debug, Clone)]
pub struct HarnessInput {
    tests: Vec<TestRecord>,
    tasks: Vec<TaskRecord>,
    path_to_tests: String,
    env: EnvMap,
    warnings: Vec<ParseWarning>,
}

impl HarnessInput {
    /// Load using the `RGT_` variables of the current process as the environment seed.
    pub fn load(options: &LoadOptions) -> Result<Self, LoadError> {
        Self::load_with_env(options, EnvMap::from_process_env())
    }

    /// Load, merging the master config into `env`.
    pub fn load_with_env(options: &LoadOptions, mut env: EnvMap) -> Result<Self, LoadError> {
        if let Some(config_path) = &options.config_path {
            ConfigMerger::new(config_path).merge_into(&mut env)?;
        }

        let ParsedInput { tests, mut tasks, path_to_tests, mut warnings } =
            InputFileParser::new(&options.input_path).parse()?;

        if let Some(tokens) = &options.task_override {
            tracing::info!("Overriding tasks in input file with '{}'", tokens);
            tasks = translate_override(tokens, &mut warnings);
        }

        if tasks.is_empty() {
            tracing::error!("{}", ParseWarning::NoTasks);
            warnings.push(ParseWarning::NoTasks);
        }

        Ok(Self { tests, tasks, path_to_tests, env, warnings })
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn tests(&self) -> &[TestRecord] {
        &self.tests
    }

    /// Local path to tests; empty when the input file never set one.
    pub fn path_to_tests(&self) -> &str {
        &self.path_to_tests
    }

    pub fn env(&self) -> &EnvMap {
        &self.env
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }
}
