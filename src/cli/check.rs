//! Check command implementation

use anyhow::Result;
use clap::Args;

use super::source::SourceArgs;

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let loaded = args.source.load()?;
    let input = args.source.input.display();

    if loaded.tasks().is_empty() {
        anyhow::bail!("No valid tasks found in {} or the task override", input);
    }
    if !loaded.warnings().is_empty() {
        anyhow::bail!("{} warning(s) in {}", loaded.warnings().len(), input);
    }

    println!("OK: {} tests, {} tasks", loaded.tests().len(), loaded.tasks().len());
    Ok(())
}
