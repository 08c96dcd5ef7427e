//! Configuration enums for option sets.
//!
//! These types describe *how* options look on the command line (prefixes,
//! separators), how often they may occur (multiplicity), what arguments they
//! carry (kind), and how many positional data items a set accepts (data
//! limit). All of them derive [`serde`] so that declaration files can name
//! them in kebab-case (e.g. `multiplicity: exactly-one`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix introducing an option key on the command line.
///
/// The prefix separates option tokens from positional data items: a token
/// starting with a configured prefix is either a recognized option or an
/// unmatched token, never data.
///
/// # Examples
///
/// ```
/// use optset_core::Prefix;
///
/// assert_eq!(Prefix::Dash.as_str(), "-");
/// assert_eq!(Prefix::DoubleDash.as_str(), "--");
/// assert_eq!(Prefix::Slash.as_str(), "/");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Prefix {
    /// Options start with `-` (typical on Unix platforms).
    Dash,
    /// Options start with `--` (GNU-style long options).
    DoubleDash,
    /// Options start with `/` (typical on Windows platforms).
    Slash,
}

impl Prefix {
    /// Returns the literal prefix characters.
    pub fn as_str(self) -> &'static str {
        match self {
            Prefix::Dash => "-",
            Prefix::DoubleDash => "--",
            Prefix::Slash => "/",
        }
    }

    /// Returns the conventional primary prefix for the current platform:
    /// [`Prefix::Slash`] on Windows, [`Prefix::Dash`] everywhere else.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Prefix::Slash
        } else {
            Prefix::Dash
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Separator between an option key and its value.
///
/// Only meaningful for options that take a value. [`Separator::Blank`] means
/// the value is supplied by the *next* token; the fixed-character separators
/// embed the value in the same token (`-log=out.txt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Separator {
    /// Key and value separated by `:` within one token.
    Colon,
    /// Key and value separated by `=` within one token.
    Equals,
    /// Value supplied as the following token.
    Blank,
}

impl Separator {
    /// Returns the separator character (`' '` for [`Separator::Blank`]).
    pub fn as_char(self) -> char {
        match self {
            Separator::Colon => ':',
            Separator::Equals => '=',
            Separator::Blank => ' ',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Required cardinality for an option's occurrences.
///
/// # Examples
///
/// ```
/// use optset_core::Multiplicity;
///
/// assert!(Multiplicity::ExactlyOne.accepts(1));
/// assert!(!Multiplicity::ExactlyOne.accepts(0));
/// assert!(Multiplicity::ZeroOrMore.accepts(17));
/// assert!(Multiplicity::OneOrMore.is_required());
/// assert!(!Multiplicity::ZeroOrOne.is_required());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Multiplicity {
    /// The option must occur exactly once.
    ExactlyOne,
    /// The option must occur at least once.
    OneOrMore,
    /// The option may occur once or not at all.
    ZeroOrOne,
    /// The option may occur any number of times.
    ZeroOrMore,
}

impl Multiplicity {
    /// Whether an option with this multiplicity must occur at least once.
    pub fn is_required(self) -> bool {
        matches!(self, Multiplicity::ExactlyOne | Multiplicity::OneOrMore)
    }

    /// Whether the given occurrence count satisfies this multiplicity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Multiplicity::ExactlyOne => count == 1,
            Multiplicity::OneOrMore => count >= 1,
            Multiplicity::ZeroOrOne => count <= 1,
            Multiplicity::ZeroOrMore => true,
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Multiplicity::ExactlyOne => "exactly once",
            Multiplicity::OneOrMore => "once or more",
            Multiplicity::ZeroOrOne => "at most once",
            Multiplicity::ZeroOrMore => "any number of times",
        };
        f.write_str(text)
    }
}

/// What kind of arguments an option carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    /// A bare switch; no value or detail argument.
    Flag,
    /// An option expecting a value.
    Value,
    /// An option expecting a value plus a detail qualifier embedded in the
    /// key token (e.g. `-Dname=value`).
    ValueWithDetail,
}

impl OptionKind {
    /// Whether options of this kind record a value per occurrence.
    pub fn takes_value(self) -> bool {
        matches!(self, OptionKind::Value | OptionKind::ValueWithDetail)
    }

    /// Whether options of this kind record a detail per occurrence.
    pub fn takes_detail(self) -> bool {
        matches!(self, OptionKind::ValueWithDetail)
    }
}

/// Upper bound on the number of positional data items a set accepts.
///
/// # Examples
///
/// ```
/// use optset_core::DataLimit;
///
/// assert!(DataLimit::Limited(2).covers(2));
/// assert!(!DataLimit::Limited(2).covers(3));
/// assert!(DataLimit::Unlimited.covers(10_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLimit {
    /// At most this many data items.
    Limited(usize),
    /// No upper bound.
    Unlimited,
}

impl DataLimit {
    /// Whether the given data count stays within this limit.
    pub fn covers(self, count: usize) -> bool {
        match self {
            DataLimit::Limited(max) => count <= max,
            DataLimit::Unlimited => true,
        }
    }
}

impl fmt::Display for DataLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLimit::Limited(max) => write!(f, "{max}"),
            DataLimit::Unlimited => f.write_str("INF"),
        }
    }
}
