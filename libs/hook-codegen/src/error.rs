//! Error types for hook generation

use hoog_format::FormatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Invalid generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("source location can't be empty")]
    EmptySource,

    #[error("destination location can't be empty")]
    EmptyDestination,

    #[error("source location '{0}' doesn't name an interface (expected /path/to/package.InterfaceName)")]
    MissingSourceObject(String),
}

/// Why an object can't be turned into a hook signature
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("empty name")]
    EmptyName,

    #[error("'{name}' not found in scope")]
    NotFound { name: String },

    #[error("'{name}' is not an interface; it is '{kind}'")]
    NotInterface { name: String, kind: String },

    #[error("interface '{name}' is empty")]
    EmptyInterface { name: String },

    #[error("interface '{name}' has {count} methods, expected exactly one")]
    TooManyMethods { name: String, count: usize },

    #[error("method {name}.{method} has results; only methods without results can be hooked")]
    HasResults { name: String, method: String },

    #[error(transparent)]
    Catalog(#[from] hoog_types::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("loading package: {0}")]
    Catalog(#[from] hoog_types::Error),

    #[error("formatting generated code: {0}")]
    Format(#[from] FormatError),

    #[error("'{name}' can't be used as the {role}; the generated code declares it already")]
    Reserved { name: String, role: &'static str },
}
