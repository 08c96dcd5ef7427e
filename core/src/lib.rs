//! Option-set matching and validation for command-line token vectors.
//!
//! This crate validates a flat vector of command-line tokens against one or
//! more declared *option sets*. A set describes the permissible options
//! (key forms, value/detail arguments, separators, multiplicities) plus
//! bounds on trailing positional data and cross-option constraints.
//! Checking a token vector yields a [`CheckReport`] with the verdict, a
//! diagnostic log, and the parsed results.
//!
//! The building blocks:
//!
//! - [`OptionSpec`] — one option with its derived matching pattern.
//! - [`OptionSet`] — a named collection of options checked together.
//! - [`OptionRegistry`] — named sets sharing creation defaults, with
//!   first-matching-set selection across them.
//! - [`ValueConstraint`] / [`OptionConstraint`] — per-option value
//!   predicates; [`ExclusiveGroup`] — at-most-one-of groups on a set.
//! - [`CheckReport`] / [`OptionResult`] — per-check results, separate from
//!   the immutable configuration.
//!
//! Matching is a single left-to-right pass: at every token the declared
//! options are tried in declaration order and the first match wins.
//! Validation then applies multiplicities, constraints, exclusive groups,
//! data arity/placement, and the unmatched-token rule, short-circuiting on
//! the first violation while logging a description for each.
//!
//! # Example
//!
//! ```
//! use optset_core::{CheckPolicy, DataLimit, Multiplicity, OptionKind, OptionSet};
//!
//! let mut set = OptionSet::new("convert", 1, DataLimit::Unlimited).unwrap();
//! set.add_option_with(OptionKind::Value, "log", None, Multiplicity::ExactlyOne)
//!     .unwrap();
//! set.add_option(OptionKind::Flag, "verbose").unwrap();
//!
//! let report = set.check(
//!     &["-log", "out.txt", "-verbose", "a.png", "b.png"],
//!     CheckPolicy::default(),
//! );
//! assert!(report.success());
//! assert_eq!(report.option("log").value_at(0), "out.txt");
//! assert_eq!(report.option("verbose").count(), 1);
//! assert_eq!(report.data_items(), ["a.png", "b.png"]);
//! ```
//!
//! # Concurrency
//!
//! Checking never mutates the configuration: [`OptionSet::check`] takes
//! `&self` and returns a fresh report, so a configured set may be checked
//! repeatedly, or shared across threads, without any reset discipline.

mod check;
mod constraint;
mod error;
mod matcher;
mod option;
mod registry;
mod report;
mod set;
mod types;

pub use constraint::{ExclusiveGroup, OptionConstraint, ValueConstraint};
pub use error::{ConfigError, Result};
pub use option::OptionSpec;
pub use registry::OptionRegistry;
pub use report::{CheckPolicy, CheckReport, OptionResult};
pub use set::OptionSet;
pub use types::{DataLimit, Multiplicity, OptionKind, Prefix, Separator};
