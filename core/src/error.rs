//! Configuration-time error types.
//!
//! A [`ConfigError`] is raised while *building* option sets and constraints
//! and is never recoverable: the configuration itself must be corrected. A
//! failed check is not an error; it is the normal
//! [`CheckReport`](crate::CheckReport) outcome.

use thiserror::Error;

/// Errors raised while building option sets, options, and constraints.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An option set was given an empty name.
    #[error("option set name may not be empty")]
    EmptySetName,

    /// An option key contains characters outside `[a-zA-Z0-9_]`.
    #[error("invalid option key '{0}': keys may only contain [a-zA-Z0-9_]")]
    InvalidKey(String),

    /// The primary key is already in use within the set.
    #[error("the key '{0}' has already been defined for this option set")]
    DuplicateKey(String),

    /// The alternate key is already in use within the set.
    #[error("the alternate key '{0}' has already been defined for this option set")]
    DuplicateAltKey(String),

    /// A set with this name already exists in the registry.
    #[error("a set named '{0}' has already been defined")]
    DuplicateSet(String),

    /// The maximum data count is smaller than the minimum.
    #[error("maximum data count {max} is smaller than minimum data count {min}")]
    InvertedDataBounds { min: usize, max: usize },

    /// A data/help text index lies outside the set's text slots.
    #[error("data text index {index} is out of range (limit {limit})")]
    InvalidDataIndex { index: usize, limit: usize },

    /// A key named in an exclusive group is not declared in the set.
    #[error("unknown option key '{0}'")]
    UnknownKey(String),

    /// An option was named in more than one exclusive group.
    #[error("option '{0}' is already part of an exclusive group")]
    AlreadyExclusive(String),

    /// An exclusive group was declared with fewer than two members.
    #[error("an exclusive group requires at least two member options")]
    ExclusiveGroupTooSmall,

    /// A constraint was attached to an option kind it does not support.
    #[error("constraint '{constraint}' cannot be applied to option '{key}'")]
    UnsupportedConstraint { key: String, constraint: String },

    /// A value constraint was built with an empty permitted-value list.
    #[error("a value constraint requires at least one permitted value")]
    EmptyConstraint,

    /// An integer range constraint has min > max.
    #[error("invalid constraint range: minimum {min} exceeds maximum {max}")]
    InvertedRange { min: i64, max: i64 },

    /// A constraint specification string could not be parsed.
    #[error("invalid {kind} constraint specification '{spec}'")]
    InvalidConstraintSpec { kind: &'static str, spec: String },

    /// Primary and alternate prefix were configured to the same value.
    #[error("prefix and alternate prefix must differ")]
    IdenticalPrefixes,

    /// Prefix or separator defaults were changed after a set was created.
    #[error("defaults can no longer be changed once option sets have been defined")]
    DefaultsFrozen,

    /// The derived matching pattern failed to compile.
    #[error("failed to compile matching pattern for key '{key}'")]
    Pattern {
        key: String,
        #[source]
        source: regex::Error,
    },
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
