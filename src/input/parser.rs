//! Line-oriented input file parsing
//!
//! Each non-empty, non-comment line starts with a directive keyword followed
//! by whitespace-separated words. The second word is a conventional separator
//! and is never inspected. `path_to_tests` and `harness_task` lines that carry
//! a single value may leave the separator out:
//!
//! ```text
//! # comment
//! path_to_tests = /opt/tests
//! test = App1 Sub1 5
//! harness_task = start_tests
//! ```

use crate::domain::{Directive, ParseWarning, TaskRecord, TestRecord, UNBOUNDED_ITERATIONS};
use crate::error::InputError;
use std::fs;
use std::path::PathBuf;

const COMMENT_MARKER: char = '#';

/// Everything a single pass over an input file produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    pub tests: Vec<TestRecord>,
    pub tasks: Vec<TaskRecord>,
    pub path_to_tests: String,
    pub warnings: Vec<ParseWarning>,
}

/// Reads and parses one input file.
#[derive(Debug, Clone)]
pub struct InputFileParser {
    path: PathBuf,
}

impl InputFileParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the whole file, then parse it.
    pub fn parse(&self) -> Result<ParsedInput, InputError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|source| InputError::Read { path: self.path.clone(), source })?;
        Ok(parse_str(&content))
    }
}

/// Parse input file content that is already in memory.
pub fn parse_str(content: &str) -> ParsedInput {
    let mut parsed = ParsedInput::default();
    for (idx, line) in content.lines().enumerate() {
        parse_line(idx + 1, line, &mut parsed);
    }
    parsed
}

fn parse_line(line_no: usize, line: &str, parsed: &mut ParsedInput) {
    // Leading whitespace must not hide a comment.
    if line.trim_start().starts_with(COMMENT_MARKER) {
        return;
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = words.first() else {
        return;
    };

    let text = line.trim();
    let Some(directive) = Directive::from_keyword(&first.to_lowercase()) else {
        warn(parsed, ParseWarning::UnknownDirective { line: line_no, text: text.to_string() });
        return;
    };

    match (directive, words.as_slice()) {
        (Directive::Test, [_, _, app, subtest]) => {
            parsed.tests.push(TestRecord::new(*app, *subtest, UNBOUNDED_ITERATIONS));
        }
        (Directive::Test, [_, _, app, subtest, count]) => match count.parse::<i64>() {
            Ok(iterations) => parsed.tests.push(TestRecord::new(*app, *subtest, iterations)),
            Err(_) => warn(
                parsed,
                ParseWarning::InvalidIterations {
                    line: line_no,
                    value: (*count).to_string(),
                    text: text.to_string(),
                },
            ),
        },
        (Directive::PathToTests, [_, path] | [_, _, path]) => {
            parsed.path_to_tests = (*path).to_string();
        }
        (Directive::HarnessTask, [_, name] | [_, _, name]) => {
            parsed.tasks.push(TaskRecord::bare(*name));
        }
        (Directive::HarnessTask, [_, _, name, arg1, arg2]) => {
            parsed.tasks.push(TaskRecord::with_args(*name, *arg1, *arg2));
        }
        _ => warn(
            parsed,
            ParseWarning::WordCount {
                line: line_no,
                directive,
                words: words.len(),
                text: text.to_string(),
            },
        ),
    }
}

fn warn(parsed: &mut ParsedInput, warning: ParseWarning) {
    tracing::warn!("{}", warning);
    parsed.warnings.push(warning);
}
