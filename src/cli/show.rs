//! Show command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::source::SourceArgs;
use harness_input::{HarnessInput, ParseWarning, TaskRecord, TestRecord};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with an error when any warning was recorded
    #[arg(long)]
    pub strict: bool,
}

#[derive(Serialize)]
struct ShowReport<'a> {
    path_to_tests: &'a str,
    tests: &'a [TestRecord],
    tasks: &'a [TaskRecord],
    warnings: &'a [ParseWarning],
}

pub fn run(args: ShowArgs) -> Result<()> {
    let loaded = args.source.load()?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&loaded)),
        OutputFormat::Json => {
            let report = ShowReport {
                path_to_tests: loaded.path_to_tests(),
                tests: loaded.tests(),
                tasks: loaded.tasks(),
                warnings: loaded.warnings(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if args.strict && !loaded.warnings().is_empty() {
        anyhow::bail!(
            "{} warning(s) in {}",
            loaded.warnings().len(),
            args.source.input.display()
        );
    }
    Ok(())
}

fn render_text(loaded: &HarnessInput) -> String {
    let mut out = String::new();

    let path = if loaded.path_to_tests().is_empty() { "(not set)" } else { loaded.path_to_tests() };
    out.push_str(&format!("Path to tests: {}\n", path));

    out.push_str("Tests:\n");
    for test in loaded.tests() {
        let iterations = if test.is_unbounded() {
            "unbounded".to_string()
        } else {
            test.iterations.to_string()
        };
        out.push_str(&format!("  {} {} (iterations: {})\n", test.app, test.subtest, iterations));
    }

    out.push_str("Tasks:\n");
    for task in loaded.tasks() {
        let args: Vec<&str> = [task.arg1.as_deref(), task.arg2.as_deref()].into_iter().flatten().collect();
        if args.is_empty() {
            out.push_str(&format!("  {}\n", task.name));
        } else {
            out.push_str(&format!("  {} {}\n", task.name, args.join(" ")));
        }
    }

    if !loaded.warnings().is_empty() {
        out.push_str("Warnings:\n");
        for warning in loaded.warnings() {
            out.push_str(&format!("  {}\n", warning));
        }
    }
    out
}
