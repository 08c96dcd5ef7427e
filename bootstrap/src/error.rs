//! Bootstrap error types.

use thiserror::Error;

use optset_core::ConfigError;

/// Errors raised while loading a declaration file.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Declaration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Declaration file is not valid YAML or does not match the expected
    /// shape.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The declared configuration violates a build-time invariant.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A data bounds string is not `N`, `MIN:MAX`, or `MIN:INF`.
    #[error("invalid data specification '{0}': expected N, MIN:MAX, or MIN:INF")]
    InvalidDataSpec(String),

    /// A constraint declaration names an unregistered kind.
    #[error("unknown constraint kind '{0}'")]
    UnknownConstraintKind(String),

    /// The declaration defines no option sets.
    #[error("a declaration must define at least one option set")]
    NoSets,
}

/// Convenience alias for results with [`BootstrapError`].
pub type Result<T> = std::result::Result<T, BootstrapError>;
