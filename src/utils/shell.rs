//! POSIX shell quoting for `export` lines

/// Quote `value` so a POSIX shell reads it back verbatim.
pub fn shell_quote(value: &str) -> String {
    if !value.is_empty()
        && value.chars().all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c))
    {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', "'\\''"))
}
