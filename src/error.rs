//! Hard errors surfaced to callers

use std::path::PathBuf;

/// The mandatory input file could not be read.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed reading input file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The master config exists but could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed reading master config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid master config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    #[error("duplicate key '{key}' in [{section}] of master config {}", path.display())]
    DuplicateKey { path: PathBuf, section: String, key: String },

    #[error("cannot resolve '{key}' in [{section}] of master config {}: {source}", path.display())]
    Interpolation {
        path: PathBuf,
        section: String,
        key: String,
        #[source]
        source: InterpolationError,
    },
}

/// A `%(name)s` or `%%` reference in a master config value that cannot be expanded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpolationError {
    #[error("no key named '{reference}' to substitute")]
    Unresolved { reference: String },

    #[error("'%' must be followed by '%' or '(name)s' in: {value}")]
    Syntax { value: String },

    #[error("references nest deeper than {max} levels")]
    TooDeep { max: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),
}
