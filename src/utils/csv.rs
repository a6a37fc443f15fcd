//! Comma-separated value splitting

/// Split a comma-separated string into trimmed, non-empty segments.
pub fn parse_csv(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|part| !part.is_empty()).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::parse_csv;

    #[test]
    fn trims_and_drops_empty_segments() {
        assert_eq!(parse_csv(" checkout, start,,stop ,"), vec!["checkout", "start", "stop"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv(" , ").is_empty());
    }
}
