//! Input and config location arguments shared by every subcommand.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use harness_input::input::{DEFAULT_INPUT_FILE, DEFAULT_MASTER_CONFIG};
use harness_input::{HarnessInput, LoadOptions};

#[derive(Args)]
pub struct SourceArgs {
    /// Harness input file to parse
    #[arg(short, long, value_name = "FILE", env = "RGT_INPUT_FILE", default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    /// INI master config merged into the environment (skipped when missing)
    #[arg(short, long, value_name = "FILE", env = "RGT_MASTER_CONFIG", default_value = DEFAULT_MASTER_CONFIG)]
    pub config: PathBuf,

    /// Do not read the master config at all
    #[arg(long)]
    pub no_config: bool,

    /// Replace the input file's tasks (comma-separated: checkout,start,stop,status)
    #[arg(short, long, value_name = "TASKS", env = "RGT_MODE")]
    pub mode: Option<String>,
}

impl SourceArgs {
    pub fn load_options(&self) -> LoadOptions {
        let mut options = LoadOptions::new(&self.input);
        if !self.no_config {
            options = options.config_path(&self.config);
        }
        if let Some(mode) = &self.mode {
            options = options.task_override(mode.as_str());
        }
        options
    }

    pub fn load(&self) -> Result<HarnessInput> {
        HarnessInput::load(&self.load_options())
            .with_context(|| format!("Failed loading harness input {}", self.input.display()))
    }
}
