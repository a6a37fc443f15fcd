//! harness-input: inspect test harness input files
//!
//! Reads an `rgt.input` file (and optionally a `master.ini`) and reports the
//! tests, tasks and environment a harness run would use.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
