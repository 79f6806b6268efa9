//! Error types for Go package loading and type resolution

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A syntax or declaration error found in a Go source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl SourceError {
    pub fn new(file: impl Into<String>, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.file, self.line, self.column, self.message)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("there are no packages in '{}'", dir.display())]
    NoPackages { dir: PathBuf },

    #[error("too many packages in '{}': {}", dir.display(), names.join(", "))]
    TooManyPackages { dir: PathBuf, names: Vec<String> },

    #[error("there are many errors:\n - {}", join_errors(errors))]
    Source { errors: Vec<SourceError> },

    #[error("cannot resolve type {name}")]
    Unresolved { name: String },

    #[error("cannot resolve embedded interface {name}: declared outside the loaded package")]
    UnresolvedEmbed { name: String },

    #[error("type {name} can't be loaded: {reason}")]
    Unsupported { name: String, reason: String },

    #[error("invalid recursive type {name}")]
    RecursiveType { name: String },

    #[error("IO error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_errors(errors: &[SourceError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n - ")
}
