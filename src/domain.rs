//! Core records produced by parsing a harness input file

use serde::Serialize;
use std::fmt;

/// Iteration count used when a `test` line does not specify one.
pub const UNBOUNDED_ITERATIONS: i64 = -1;

/// A single test to run: application, subtest and how many times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestRecord {
    pub app: String,
    pub subtest: String,
    pub iterations: i64,
}

impl TestRecord {
    pub fn new(app: impl Into<String>, subtest: impl Into<String>, iterations: i64) -> Self {
        Self { app: app.into(), subtest: subtest.into(), iterations }
    }

    pub fn is_unbounded(&self) -> bool {
        self.iterations == UNBOUNDED_ITERATIONS
    }
}

/// A harness lifecycle task with up to two optional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    pub name: String,
    pub arg1: Option<String>,
    pub arg2: Option<String>,
}

impl TaskRecord {
    /// Task without arguments.
    pub fn bare(name: impl Into<String>) -> Self {
        Self { name: name.into(), arg1: None, arg2: None }
    }

    pub fn with_args(
        name: impl Into<String>,
        arg1: impl Into<String>,
        arg2: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), arg1: Some(arg1.into()), arg2: Some(arg2.into()) }
    }
}

/// Recognized leading keywords of an input file line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    Test,
    PathToTests,
    HarnessTask,
}

impl Directive {
    pub fn keyword(self) -> &'static str {
        match self {
            Directive::Test => "test",
            Directive::PathToTests => "path_to_tests",
            Directive::HarnessTask => "harness_task",
        }
    }

    /// Match an already lower-cased first word.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "test" => Some(Directive::Test),
            "path_to_tests" => Some(Directive::PathToTests),
            "harness_task" => Some(Directive::HarnessTask),
            _ => None,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A recoverable problem found while reading the input or applying an override.
///
/// None of these abort a parse: the offending line or token contributes
/// nothing and processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    #[error("line {line}: invalid number of words ({words}) in {directive} line: {text}")]
    WordCount { line: usize, directive: Directive, words: usize, text: String },

    #[error("line {line}: invalid iteration count '{value}' in test line: {text}")]
    InvalidIterations { line: usize, value: String, text: String },

    #[error("line {line}: invalid line: {text}")]
    UnknownDirective { line: usize, text: String },

    #[error("invalid task in the task override: {token}")]
    InvalidOverrideToken { token: String },

    #[error("no valid tasks found in the input file or the task override")]
    NoTasks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_keywords_round_trip() {
        for directive in [Directive::Test, Directive::PathToTests, Directive::HarnessTask] {
            assert_eq!(Directive::from_keyword(directive.keyword()), Some(directive));
        }
        assert_eq!(Directive::from_keyword("TEST"), None);
    }

    #[test]
    fn warning_display_names_the_offending_line() {
        let warning = ParseWarning::WordCount {
            line: 4,
            directive: Directive::HarnessTask,
            words: 4,
            text: "harness_task = start_tests extra".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("line 4"));
        assert!(msg.contains("harness_task = start_tests extra"));
    }

    #[test]
    fn warning_serializes_with_kind_tag() {
        let warning = ParseWarning::InvalidOverrideToken { token: "rebuild".to_string() };
        let json = serde_json::to_value(&warning).expect("json");
        assert_eq!(json["kind"], "invalid_override_token");
        assert_eq!(json["token"], "rebuild");
    }
}
