//! Constraints evaluated after matching completes.
//!
//! Two shapes exist: [`OptionConstraint`]s attach to a single option and
//! judge its recorded values ([`ValueConstraint`] is the built-in family;
//! callers may implement the trait for their own predicates), while
//! [`ExclusiveGroup`]s attach to the set and tie several options together
//! so that at most one of them may occur.

use std::fmt;

use crate::error::{ConfigError, Result};
use crate::option::OptionSpec;
use crate::report::{CheckReport, OptionResult};
use crate::types::Multiplicity;

/// A predicate over one option's recorded values.
///
/// Implementations are attached via
/// [`OptionSpec::add_constraint`](crate::OptionSpec::add_constraint) and
/// evaluated by the validation engine for every option that occurred at
/// least once. The `Display` impl is used verbatim in diagnostic log
/// entries, so it should describe the constraint compactly.
pub trait OptionConstraint: fmt::Debug + fmt::Display + Send + Sync {
    /// Whether this constraint can be attached to the given option.
    ///
    /// The default accepts every option; override to restrict the
    /// supported kinds.
    fn supports(&self, spec: &OptionSpec) -> bool {
        let _ = spec;
        true
    }

    /// Whether the recorded results satisfy this constraint.
    fn is_satisfied(&self, result: &OptionResult) -> bool;
}

#[derive(Debug, Clone)]
enum ValueCheck {
    Strings {
        allowed: Vec<String>,
        case_sensitive: bool,
    },
    Ints(Vec<i64>),
    Range {
        min: i64,
        max: i64,
    },
}

/// Restricts the values acceptable for a value-taking option.
///
/// Three kinds are supported: a string enumeration (with a case-sensitivity
/// flag), an integer enumeration, and an inclusive integer range. The
/// constraint is satisfied when **at least one** recorded value, across all
/// occurrences of the option, is acceptable; it is not required that every
/// recorded value matches. A recorded value that fails to parse as an
/// integer merely fails to satisfy the numeric kinds itself; another
/// occurrence can still satisfy the constraint.
///
/// # Examples
///
/// ```
/// use optset_core::ValueConstraint;
///
/// let colors = ValueConstraint::strings(&["RED", "GREEN", "BLUE"], false).unwrap();
/// let ports = ValueConstraint::range(1024, 65535).unwrap();
/// assert_eq!(colors.to_string(), "string-values: +RED|GREEN|BLUE");
/// assert_eq!(ports.to_string(), "int-range: 1024:65535");
/// ```
#[derive(Debug, Clone)]
pub struct ValueConstraint {
    check: ValueCheck,
}

impl ValueConstraint {
    /// A string enumeration constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyConstraint`] when `allowed` is empty.
    pub fn strings(allowed: &[&str], case_sensitive: bool) -> Result<Self> {
        if allowed.is_empty() {
            return Err(ConfigError::EmptyConstraint);
        }
        Ok(Self {
            check: ValueCheck::Strings {
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
                case_sensitive,
            },
        })
    }

    /// An integer enumeration constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyConstraint`] when `allowed` is empty.
    pub fn ints(allowed: &[i64]) -> Result<Self> {
        if allowed.is_empty() {
            return Err(ConfigError::EmptyConstraint);
        }
        Ok(Self {
            check: ValueCheck::Ints(allowed.to_vec()),
        })
    }

    /// An inclusive integer range constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedRange`] when `min > max`.
    pub fn range(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(ConfigError::InvertedRange { min, max });
        }
        Ok(Self {
            check: ValueCheck::Range { min, max },
        })
    }

    /// Parses a string enumeration from its specification form: values
    /// separated by `|`, with a leading `+` selecting case-insensitive
    /// comparison (`+RED|GREEN|BLUE`).
    pub fn parse_strings(spec: &str) -> Result<Self> {
        let (case_sensitive, body) = match spec.strip_prefix('+') {
            Some(rest) => (false, rest),
            None => (true, spec),
        };
        if body.is_empty() {
            return Err(ConfigError::InvalidConstraintSpec {
                kind: "string-values",
                spec: spec.to_string(),
            });
        }
        let allowed: Vec<&str> = body.split('|').collect();
        Self::strings(&allowed, case_sensitive)
    }

    /// Parses an integer enumeration from its specification form: values
    /// separated by `|` (`1|2|7`).
    pub fn parse_ints(spec: &str) -> Result<Self> {
        let allowed = spec
            .split('|')
            .map(|part| part.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::InvalidConstraintSpec {
                kind: "int-values",
                spec: spec.to_string(),
            })?;
        Self::ints(&allowed)
    }

    /// Parses an integer range from its specification form `MIN:MAX`
    /// (`7:12`).
    pub fn parse_range(spec: &str) -> Result<Self> {
        let invalid = || ConfigError::InvalidConstraintSpec {
            kind: "int-range",
            spec: spec.to_string(),
        };
        let (min, max) = spec.split_once(':').ok_or_else(invalid)?;
        let min = min.trim().parse::<i64>().map_err(|_| invalid())?;
        let max = max.trim().parse::<i64>().map_err(|_| invalid())?;
        Self::range(min, max)
    }

    fn accepts(&self, value: &str) -> bool {
        match &self.check {
            ValueCheck::Strings {
                allowed,
                case_sensitive,
            } => {
                if *case_sensitive {
                    allowed.iter().any(|s| s == value)
                } else {
                    allowed.iter().any(|s| s.eq_ignore_ascii_case(value))
                }
            }
            ValueCheck::Ints(allowed) => match value.parse::<i64>() {
                Ok(n) => allowed.contains(&n),
                Err(_) => false,
            },
            ValueCheck::Range { min, max } => match value.parse::<i64>() {
                Ok(n) => n >= *min && n <= *max,
                Err(_) => false,
            },
        }
    }
}

impl OptionConstraint for ValueConstraint {
    fn supports(&self, spec: &OptionSpec) -> bool {
        spec.kind().takes_value()
    }

    fn is_satisfied(&self, result: &OptionResult) -> bool {
        result.values().iter().any(|value| self.accepts(value))
    }
}

impl fmt::Display for ValueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.check {
            ValueCheck::Strings {
                allowed,
                case_sensitive,
            } => {
                let marker = if *case_sensitive { "" } else { "+" };
                write!(f, "string-values: {marker}{}", allowed.join("|"))
            }
            ValueCheck::Ints(allowed) => {
                let parts: Vec<String> = allowed.iter().map(|n| n.to_string()).collect();
                write!(f, "int-values: {}", parts.join("|"))
            }
            ValueCheck::Range { min, max } => write!(f, "int-range: {min}:{max}"),
        }
    }
}

/// Ties two or more options together so that at most one may occur.
///
/// Registering a group marks each member option exclusive (removing it from
/// the regular multiplicity check) and overrides each member's multiplicity
/// with the group's shared one. The group itself is required: a check fails
/// when no member occurs at all, when more than one does, or when the one
/// that occurred violates the shared multiplicity.
#[derive(Debug, Clone)]
pub struct ExclusiveGroup {
    keys: Vec<String>,
    multiplicity: Multiplicity,
}

impl ExclusiveGroup {
    pub(crate) fn new(keys: Vec<String>, multiplicity: Multiplicity) -> Self {
        Self { keys, multiplicity }
    }

    /// The primary keys of the member options.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The multiplicity shared by all member options.
    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    pub(crate) fn is_satisfied(&self, report: &CheckReport) -> bool {
        let mut found: Option<&OptionResult> = None;
        for key in &self.keys {
            let result = report.option(key);
            if result.is_set() {
                if found.is_some() {
                    return false;
                }
                found = Some(result);
            }
        }
        match found {
            Some(result) => self.multiplicity.accepts(result.count()),
            None => false,
        }
    }
}

impl fmt::Display for ExclusiveGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keys.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_values(values: &[&str]) -> OptionResult {
        let mut result = OptionResult::new("color", true, false);
        for value in values {
            result.record(Some(value.to_string()), None);
        }
        result
    }

    #[test]
    fn test_string_constraint_case_insensitive() {
        let constraint = ValueConstraint::strings(&["RED", "GREEN"], false).unwrap();
        assert!(constraint.is_satisfied(&result_with_values(&["red"])));
        assert!(!constraint.is_satisfied(&result_with_values(&["blue"])));
    }

    #[test]
    fn test_string_constraint_case_sensitive() {
        let constraint = ValueConstraint::strings(&["RED"], true).unwrap();
        assert!(!constraint.is_satisfied(&result_with_values(&["red"])));
        assert!(constraint.is_satisfied(&result_with_values(&["RED"])));
    }

    #[test]
    fn test_range_tolerates_malformed_values() {
        // A non-numeric value fails only itself; a later occurrence can
        // still satisfy the constraint.
        let constraint = ValueConstraint::range(7, 12).unwrap();
        assert!(constraint.is_satisfied(&result_with_values(&["many", "9"])));
        assert!(!constraint.is_satisfied(&result_with_values(&["many", "5"])));
    }

    #[test]
    fn test_at_least_one_value_suffices() {
        let constraint = ValueConstraint::range(7, 12).unwrap();
        assert!(constraint.is_satisfied(&result_with_values(&["5", "9"])));
    }

    #[test]
    fn test_int_values_constraint() {
        let constraint = ValueConstraint::ints(&[1, 2, 7]).unwrap();
        assert!(constraint.is_satisfied(&result_with_values(&["7"])));
        assert!(!constraint.is_satisfied(&result_with_values(&["3"])));
    }

    #[test]
    fn test_spec_string_parsing() {
        assert_eq!(
            ValueConstraint::parse_strings("+Foo|Bah").unwrap().to_string(),
            "string-values: +Foo|Bah"
        );
        assert_eq!(
            ValueConstraint::parse_ints("1|2|7").unwrap().to_string(),
            "int-values: 1|2|7"
        );
        assert_eq!(
            ValueConstraint::parse_range("7:12").unwrap().to_string(),
            "int-range: 7:12"
        );
        assert!(ValueConstraint::parse_range("12:7").is_err());
        assert!(ValueConstraint::parse_ints("1|x").is_err());
    }

    #[test]
    fn test_empty_constraint_rejected() {
        assert!(matches!(
            ValueConstraint::strings(&[], true),
            Err(ConfigError::EmptyConstraint)
        ));
    }
}
