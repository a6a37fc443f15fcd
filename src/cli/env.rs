//! Env command implementation

use anyhow::Result;
use clap::Args;

use super::source::SourceArgs;
use harness_input::utils::shell_quote;

#[derive(Args)]
pub struct EnvArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Also print RGT_ variables that were already set in the environment
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: EnvArgs) -> Result<()> {
    let loaded = args.source.load()?;
    let env = loaded.env();

    let vars: Vec<(&str, &str)> = if args.all { env.iter().collect() } else { env.added().collect() };
    for (key, value) in vars {
        println!("export {}={}", key, shell_quote(value));
    }
    Ok(())
}
