//! Small text helpers shared by the parser and the CLI

pub mod csv;
pub mod shell;

pub use csv::parse_csv;
pub use shell::shell_quote;
