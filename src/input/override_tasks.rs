//! Task list override from the command line

use crate::domain::{ParseWarning, TaskRecord};
use crate::utils::parse_csv;

/// Map an override token to the internal task name it stands for.
pub fn task_name_for_token(token: &str) -> Option<&'static str> {
    match token.to_ascii_lowercase().as_str() {
        "checkout" => Some("check_out_tests"),
        "start" => Some("start_tests"),
        "stop" => Some("stop_tests"),
        "status" => Some("display_tests"),
        _ => None,
    }
}

/// Translate a comma-separated override such as `checkout,start` into tasks.
///
/// Unknown tokens are reported in `warnings` and skipped; the rest still apply.
pub fn translate_override(tokens: &str, warnings: &mut Vec<ParseWarning>) -> Vec<TaskRecord> {
    let mut tasks = Vec::new();
    for token in parse_csv(tokens) {
        match task_name_for_token(&token) {
            Some(name) => tasks.push(TaskRecord::bare(name)),
            None => {
                let warning = ParseWarning::InvalidOverrideToken { token };
                tracing::warn!("{}", warning);
                warnings.push(warning);
            }
        }
    }
    tasks
}
